use crate::config::effective_guest_count;
use crate::models::event::EventRecord;
use crate::operations::currency::format_currency;

/// Planning suggestions for an event, from budget, guest list and keywords in
/// its title, description and location.
pub fn recommendations(event: &EventRecord) -> Vec<String> {
    let title = event.title.to_lowercase();
    let description = event.description.as_deref().unwrap_or("").to_lowercase();
    let location = event.location.to_lowercase();
    let mut out: Vec<String> = Vec::new();

    if event.budget > 0 {
        let budget = format_currency(event.budget);
        if event.budget < 50_000 {
            out.push(format!(
                "With a budget of {}, focus on essentials and consider DIY options",
                budget
            ));
        } else if event.budget < 200_000 {
            out.push(format!(
                "Your {} budget allows for quality services - prioritize venue and food",
                budget
            ));
        } else {
            out.push(format!(
                "With your premium budget of {}, consider luxury upgrades and professional services",
                budget
            ));
        }

        let guests = u64::from(effective_guest_count(event.guest_count));
        let per_guest = (event.budget + guests / 2) / guests;
        if per_guest < 1000 {
            out.push(format!(
                "Budget of {} per guest - consider buffet-style service to optimize costs",
                format_currency(per_guest)
            ));
        } else if per_guest > 5000 {
            out.push(format!(
                "With {} per guest, you can offer premium dining and amenities",
                format_currency(per_guest)
            ));
        }
    }

    let themes: [(bool, [&str; 3]); 4] = [
        (
            title.contains("holiday")
                || description.contains("holiday")
                || description.contains("party")
                || description.contains("celebration"),
            [
                "Consider seasonal decorations to enhance the festive atmosphere",
                "Plan activities that encourage team bonding",
                "Include dietary options for all preferences",
            ],
        ),
        (
            title.contains("launch") || description.contains("launch"),
            [
                "Prepare product demonstration stations",
                "Schedule media coverage and press releases",
                "Set up networking opportunities",
            ],
        ),
        (
            title.contains("wedding") || description.contains("wedding"),
            [
                "Ensure the venue has sufficient seating and amenities",
                "Coordinate with vendors for smooth logistics",
                "Plan a detailed timeline for ceremonial events",
            ],
        ),
        (
            title.contains("birthday") || description.contains("birthday"),
            [
                "Arrange a kid-friendly zone if children are attending",
                "Plan engaging games and entertainment",
                "Order a customized birthday cake",
            ],
        ),
    ];
    for (matched, tips) in themes {
        if matched {
            out.extend(tips.iter().map(|t| t.to_string()));
        }
    }

    let keyword_tips: [(&[&str], &str); 5] = [
        (&["catering"], "Confirm catering services early and finalize menu options"),
        (&["vendor"], "Maintain clear communication and contracts with all vendors"),
        (&["music", "dj"], "Book professional DJs or live bands early"),
        (&["transportation"], "Arrange reliable transportation for guests"),
        (&["photographer"], "Hire a professional photographer to capture key moments"),
    ];
    for (keywords, tip) in keyword_tips {
        if keywords.iter().any(|k| description.contains(k)) {
            out.push(tip.to_string());
        }
    }

    if event.guest_count > 100 {
        out.push("Hire extra staff to manage large guest list".to_string());
    }

    if location.contains("outdoor")
        || description.contains("outdoor")
        || location.contains("park")
    {
        out.push("Prepare a backup plan for weather changes or outdoor elements".to_string());
    }

    if out.is_empty() {
        out.extend(
            [
                "Ensure clear communication with all vendors",
                "Prepare a backup plan for outdoor elements",
                "Consider guest accessibility needs",
            ]
            .iter()
            .map(|t| t.to_string()),
        );
    }

    out
}

/// Checklist seeded into a new event. Theme keywords in the title or
/// description pick a fixed set; otherwise description keywords each add a task.
pub fn starter_tasks(event: &EventRecord) -> Vec<&'static str> {
    let title = event.title.to_lowercase();
    let description = event.description.as_deref().unwrap_or("").to_lowercase();
    let has_keyword = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| title.contains(k) || description.contains(k))
    };

    if has_keyword(&["holiday", "party", "celebration"]) {
        return vec![
            "Confirm catering order",
            "Send invitations",
            "Book photographer",
            "Select decorations",
            "Arrange transportation",
        ];
    }
    if has_keyword(&["launch"]) {
        return vec![
            "Finalize presentation slides",
            "Book venue",
            "Arrange decoration",
            "Schedule media coverage",
            "Prepare press kits",
        ];
    }
    if has_keyword(&["wedding"]) {
        return vec![
            "Book wedding venue",
            "Hire photographer",
            "Send invites",
            "Arrange catering",
            "Arrange transportation",
        ];
    }
    if has_keyword(&["birthday"]) {
        return vec!["Choose party theme", "Order cake and food", "Send birthday invites"];
    }

    let keyword_tasks: [(&[&str], &'static str); 5] = [
        (&["catering"], "Confirm catering details"),
        (&["vendor"], "Confirm with vendors"),
        (&["music", "dj"], "Book DJ or band"),
        (&["transportation"], "Arrange transportation"),
        (&["photographer"], "Hire photographer"),
    ];
    let mut tasks: Vec<&'static str> = keyword_tasks
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| description.contains(k)))
        .map(|(_, task)| *task)
        .collect();
    if tasks.is_empty() {
        tasks = vec!["Finalize details", "Confirm with vendors"];
    }
    tasks
}
