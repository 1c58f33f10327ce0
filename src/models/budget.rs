use crate::models::event_type::EventType;
use rust_decimal::Decimal;

/// Static budget bucket for one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTemplate {
    pub name: &'static str,
    pub percentage: u32,
    pub description: &'static str,
    pub tasks: &'static [&'static str],
}

impl CategoryTemplate {
    const fn new(
        name: &'static str,
        percentage: u32,
        description: &'static str,
        tasks: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            percentage,
            description,
            tasks,
        }
    }
}

static WEDDING: [CategoryTemplate; 7] = [
    CategoryTemplate::new(
        "Venue & Catering",
        45,
        "Venue rental, food, drinks, and service",
        &["Book wedding venue", "Arrange catering", "Setup bar service"],
    ),
    CategoryTemplate::new(
        "Decor & Flowers",
        15,
        "Decorations, floral arrangements, lighting",
        &["Hire decorator", "Order flowers", "Arrange lighting"],
    ),
    CategoryTemplate::new(
        "Photography & Video",
        12,
        "Professional photography and videography",
        &["Hire photographer", "Book videographer", "Plan photo sessions"],
    ),
    CategoryTemplate::new(
        "Attire & Beauty",
        10,
        "Wedding attire, accessories, makeup, and hair",
        &["Purchase outfits", "Schedule makeup", "Book hair styling"],
    ),
    CategoryTemplate::new(
        "Music & Entertainment",
        8,
        "DJ, band, or other entertainment",
        &["Book DJ or band", "Plan entertainment", "Create playlist"],
    ),
    CategoryTemplate::new(
        "Transportation",
        5,
        "Transportation for couple and guests",
        &["Arrange transportation", "Book vehicles", "Plan logistics"],
    ),
    CategoryTemplate::new(
        "Miscellaneous",
        5,
        "Gifts, stationery, and unexpected expenses",
        &["Order wedding favors", "Purchase thank you cards", "Budget for extras"],
    ),
];

static CORPORATE: [CategoryTemplate; 7] = [
    CategoryTemplate::new(
        "Venue & Setup",
        35,
        "Venue rental, equipment, staging",
        &["Book venue", "Arrange setup", "Organize equipment"],
    ),
    CategoryTemplate::new(
        "Catering & Refreshments",
        25,
        "Food, drinks, and service",
        &["Confirm catering order", "Setup refreshments", "Plan meal options"],
    ),
    CategoryTemplate::new(
        "Technology & AV",
        15,
        "Audio/visual equipment, tech support",
        &["Rent AV equipment", "Setup presentation tech", "Test all systems"],
    ),
    CategoryTemplate::new(
        "Speakers & Entertainment",
        10,
        "Guest speakers, entertainment, activities",
        &["Book speakers", "Plan activities", "Schedule entertainment"],
    ),
    CategoryTemplate::new(
        "Marketing & Materials",
        8,
        "Printed materials, signage, promotional items",
        &["Design materials", "Print collateral", "Create signage"],
    ),
    CategoryTemplate::new(
        "Staff & Services",
        5,
        "Event staff, coordinators, security",
        &["Hire event staff", "Arrange security", "Schedule coordinators"],
    ),
    CategoryTemplate::new(
        "Miscellaneous",
        2,
        "Unexpected expenses and contingency",
        &["Plan for contingencies", "Prepare backup options", "Set aside emergency funds"],
    ),
];

static BIRTHDAY: [CategoryTemplate; 6] = [
    CategoryTemplate::new(
        "Venue & Space",
        30,
        "Location rental, setup, decoration",
        &["Choose party venue", "Arrange setup", "Decorate space"],
    ),
    CategoryTemplate::new(
        "Food & Cake",
        25,
        "Catering, cake, and refreshments",
        &["Order cake and food", "Plan menu", "Arrange refreshments"],
    ),
    CategoryTemplate::new(
        "Entertainment",
        20,
        "Music, games, activities, performers",
        &["Plan entertainment", "Organize games", "Book performers"],
    ),
    CategoryTemplate::new(
        "Decorations & Supplies",
        15,
        "Theme decorations, balloons, party supplies",
        &["Choose party theme", "Buy decorations", "Get party supplies"],
    ),
    CategoryTemplate::new(
        "Gifts & Favors",
        7,
        "Party favors, gift bags, prizes",
        &["Prepare party favors", "Get prizes", "Create gift bags"],
    ),
    CategoryTemplate::new(
        "Miscellaneous",
        3,
        "Photography, extra expenses",
        &["Arrange photography", "Plan for extras", "Prepare contingencies"],
    ),
];

static SOCIAL: [CategoryTemplate; 6] = [
    CategoryTemplate::new(
        "Venue & Setup",
        35,
        "Venue rental, furniture, setup",
        &["Book venue", "Arrange furniture", "Setup space"],
    ),
    CategoryTemplate::new(
        "Food & Beverages",
        30,
        "Catering, drinks, service",
        &["Order catering", "Setup bar service", "Plan menu"],
    ),
    CategoryTemplate::new(
        "Decor & Atmosphere",
        15,
        "Decorations, lighting, ambiance",
        &["Plan decor", "Arrange lighting", "Create atmosphere"],
    ),
    CategoryTemplate::new(
        "Entertainment & Activities",
        10,
        "Music, performances, activities",
        &["Book entertainment", "Plan activities", "Create playlist"],
    ),
    CategoryTemplate::new(
        "Invitations & Communication",
        5,
        "Invites, RSVPs, communications",
        &["Send invites", "Track RSVPs", "Communicate details"],
    ),
    CategoryTemplate::new(
        "Miscellaneous",
        5,
        "Extra expenses and contingency",
        &["Plan for extras", "Prepare backup plans", "Budget for emergencies"],
    ),
];

static OTHER: [CategoryTemplate; 6] = [
    CategoryTemplate::new(
        "Venue & Facilities",
        35,
        "Location, facilities, basic setup",
        &["Book venue", "Arrange setup", "Check facilities"],
    ),
    CategoryTemplate::new(
        "Food & Refreshments",
        25,
        "Catering, drinks, service",
        &["Arrange catering", "Order refreshments", "Plan menu"],
    ),
    CategoryTemplate::new(
        "Services & Personnel",
        15,
        "Staff, services, coordination",
        &["Hire staff", "Coordinate services", "Assign responsibilities"],
    ),
    CategoryTemplate::new(
        "Equipment & Materials",
        10,
        "Necessary equipment and materials",
        &["Rent equipment", "Purchase materials", "Prepare supplies"],
    ),
    CategoryTemplate::new(
        "Decor & Presentation",
        10,
        "Visual elements, decor, presentation",
        &["Plan decor", "Arrange presentation", "Setup visuals"],
    ),
    CategoryTemplate::new(
        "Miscellaneous",
        5,
        "Additional expenses and contingency",
        &["Prepare for extras", "Plan contingencies", "Budget for emergencies"],
    ),
];

/// Fixed, ordered category templates for an event type.
pub fn templates_for(event_type: EventType) -> &'static [CategoryTemplate] {
    match event_type {
        EventType::Wedding => &WEDDING,
        EventType::Corporate => &CORPORATE,
        EventType::Birthday => &BIRTHDAY,
        EventType::Social => &SOCIAL,
        EventType::Other => &OTHER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCountBand {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl GuestCountBand {
    pub fn for_guests(guest_count: u32) -> Self {
        match guest_count {
            0..=50 => GuestCountBand::Small,
            51..=100 => GuestCountBand::Medium,
            101..=200 => GuestCountBand::Large,
            _ => GuestCountBand::ExtraLarge,
        }
    }

    /// 0.8, 1.0, 1.2 and 1.4 respectively.
    pub fn factor(self) -> Decimal {
        match self {
            GuestCountBand::Small => Decimal::new(8, 1),
            GuestCountBand::Medium => Decimal::ONE,
            GuestCountBand::Large => Decimal::new(12, 1),
            GuestCountBand::ExtraLarge => Decimal::new(14, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAllocation {
    pub name: String,
    pub amount: u64,
}

/// One category of a computed allocation. Produced fresh per calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAllocation {
    pub category: String,
    pub amount: u64,
    pub percentage: u32,
    pub tasks: Vec<TaskAllocation>,
}

/// Result of looking up which category a task falls under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBudget {
    pub amount: u64,
    pub category: String,
    pub percentage: u32,
}
