mod config;
mod db;
mod error;
mod models;
mod operations;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use config::{Config, DEFAULT_GUEST_COUNT};
use db::{event_repository, task_repository};
use error::AppResult;
use models::budget::{templates_for, BudgetAllocation};
use models::event::EventRecord;
use models::event_type::EventType;
use operations::allocation::budget_for_task;
use operations::currency::{format_currency, parse_budget};
use operations::event::{
    add_task_db, create_event_db, event_allocations, find_event, remove_event_db,
    set_finished_db, task_budget_hint, update_event_db, EventInput,
};
use operations::view::{displayed_allocations, NO_BUDGET_MESSAGE};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "partypal", version, about = "Event planning with budget allocation")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "PARTYPAL_DB")]
    db: Option<String>,
    /// Log filter used when RUST_LOG is not set.
    #[arg(long = "log-level", global = true, env = "PARTYPAL_LOG")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Splits a budget across the categories of an event type.
    Allocate {
        #[command(flatten)]
        budget: BudgetArgs,
        /// Browse the allocation interactively.
        #[arg(long)]
        view: bool,
        /// Also write the allocation to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Looks up the category and amount for a task title.
    TaskBudget {
        task: String,
        #[command(flatten)]
        budget: BudgetArgs,
    },
    #[command(subcommand)]
    Event(EventCommands),
    #[command(subcommand)]
    Task(TaskCommands),
    /// Totals and planning progress across all events.
    Dashboard,
}

#[derive(Args, Debug)]
struct BudgetArgs {
    #[arg(long = "type")]
    event_type: String,
    /// Total budget; "₹5,00,000" and "500000" are both accepted.
    #[arg(long)]
    budget: String,
    #[arg(long, default_value_t = DEFAULT_GUEST_COUNT)]
    guests: u32,
}

#[derive(Subcommand, Debug)]
enum EventCommands {
    Add(EventFields),
    List,
    Show { id: String },
    Update {
        id: String,
        #[command(flatten)]
        fields: EventFields,
    },
    Remove { id: String },
    Finish { id: String },
    Reopen { id: String },
}

#[derive(Args, Debug)]
struct EventFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long = "type")]
    event_type: Option<String>,
    /// YYYY-MM-DD, today, tomorrow or yesterday.
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    guests: Option<u32>,
    #[arg(long)]
    budget: Option<String>,
}

impl From<EventFields> for EventInput {
    fn from(fields: EventFields) -> Self {
        EventInput {
            title: fields.title,
            event_type: fields.event_type,
            date: fields.date,
            location: fields.location,
            description: fields.description,
            guest_count: fields.guests,
            budget: fields.budget,
        }
    }
}

#[derive(Subcommand, Debug)]
enum TaskCommands {
    Add {
        event_id: String,
        title: String,
        #[arg(long)]
        due: Option<String>,
    },
    List { event_id: String },
    Toggle { task_id: i64 },
    Remove { task_id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::new(cli.db, cli.log_level);
    config::init_tracing(&config);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> AppResult<()> {
    let today = Local::now().date_naive();

    match command {
        Commands::Allocate { budget, view, csv } => {
            let event_type = EventType::normalize(&budget.event_type);
            let requested = budget.event_type.to_lowercase();
            if !EventType::ALL.iter().any(|t| t.as_str() == requested) {
                println!(
                    "Unknown event type '{}', using the other templates.",
                    budget.event_type
                );
            }
            let total = parse_budget(&budget.budget);
            let Some(allocations) = displayed_allocations(event_type, total, budget.guests) else {
                println!("{}", NO_BUDGET_MESSAGE);
                return Ok(());
            };

            if let Some(path) = csv {
                let rows = operations::export::export_allocations(&path, &allocations)?;
                println!("Wrote {} rows to {}", rows, path.display());
            }
            if view {
                let title = format!("{} budget", capitalize(event_type.as_str()));
                operations::view::run_allocation_view(&title, total, budget.guests, allocations)?;
            } else {
                print_allocations(event_type, total, budget.guests, &allocations);
            }
        }
        Commands::TaskBudget { task, budget } => {
            let total = parse_budget(&budget.budget);
            let hint = budget_for_task(&task, &budget.event_type, total, budget.guests);
            println!(
                "{}: {} from {} ({}%)",
                task,
                format_currency(hint.amount),
                hint.category,
                hint.percentage
            );
        }
        Commands::Event(command) => {
            let conn = db::connection::establish_connection(&config.db_path)?;
            run_event_command(&conn, command, today)?;
        }
        Commands::Task(command) => {
            let conn = db::connection::establish_connection(&config.db_path)?;
            run_task_command(&conn, command, today)?;
        }
        Commands::Dashboard => {
            let conn = db::connection::establish_connection(&config.db_path)?;
            print_dashboard(&conn)?;
        }
    }
    Ok(())
}

fn run_event_command(
    conn: &Connection,
    command: EventCommands,
    today: NaiveDate,
) -> AppResult<()> {
    match command {
        EventCommands::Add(fields) => {
            let event = create_event_db(conn, &fields.into(), today)?;
            println!("Event created with ID {}", event.id);
        }
        EventCommands::List => {
            let events = event_repository::get_all_events(conn)?;
            if events.is_empty() {
                println!("No events yet. Create one with `partypal event add --title ...`.");
            }
            for event in &events {
                println!(
                    "{}  {}  {:<10} {:<30} {:>12}{}",
                    event.id,
                    event.date,
                    event.event_type,
                    event.title,
                    format_currency(event.budget),
                    if event.is_finished { "  (finished)" } else { "" }
                );
            }
        }
        EventCommands::Show { id } => {
            let event = find_event(conn, &id)?;
            print_event(conn, &event)?;
        }
        EventCommands::Update { id, fields } => {
            let event = update_event_db(conn, &id, &fields.into(), today)?;
            println!("Event {} updated.", event.id);
        }
        EventCommands::Remove { id } => {
            remove_event_db(conn, &id)?;
            println!("Event removed successfully.");
        }
        EventCommands::Finish { id } => {
            set_finished_db(conn, &id, true)?;
            println!("Event marked as finished.");
        }
        EventCommands::Reopen { id } => {
            set_finished_db(conn, &id, false)?;
            println!("Event reopened.");
        }
    }
    Ok(())
}

fn run_task_command(
    conn: &Connection,
    command: TaskCommands,
    today: NaiveDate,
) -> AppResult<()> {
    match command {
        TaskCommands::Add { event_id, title, due } => {
            let task = add_task_db(conn, &event_id, &title, due.as_deref(), today)?;
            println!("Task {} added.", task.id);
        }
        TaskCommands::List { event_id } => {
            let event = find_event(conn, &event_id)?;
            print_checklist(conn, &event)?;
        }
        TaskCommands::Toggle { task_id } => {
            let completed = task_repository::toggle_task(conn, task_id)?;
            println!(
                "Task {} marked as {}.",
                task_id,
                if completed { "done" } else { "open" }
            );
        }
        TaskCommands::Remove { task_id } => {
            task_repository::remove_task(conn, task_id)?;
            println!("Task removed successfully.");
        }
    }
    Ok(())
}

fn print_allocations(
    event_type: EventType,
    total: u64,
    guests: u32,
    allocations: &[BudgetAllocation],
) {
    println!(
        "Budget allocation for a {} event: {} for {} guests",
        event_type,
        format_currency(total),
        guests
    );
    let templates = templates_for(event_type);
    for allocation in allocations {
        println!(
            "\n{:<32} {:>14} {:>4}%  {} tasks",
            allocation.category,
            format_currency(allocation.amount),
            allocation.percentage,
            allocation.tasks.len()
        );
        if let Some(template) = templates.iter().find(|t| t.name == allocation.category) {
            println!("  {}", template.description);
        }
        for task in &allocation.tasks {
            println!("    - {:<30} {:>12}", task.name, format_currency(task.amount));
        }
    }
}

fn print_event(conn: &Connection, event: &EventRecord) -> AppResult<()> {
    println!("{}", event.title);
    println!("  ID:        {}", event.id);
    println!("  Type:      {}", event.event_type);
    println!("  Date:      {}", event.date);
    println!("  Location:  {}", event.location);
    if let Some(description) = &event.description {
        println!("  About:     {}", description);
    }
    if event.guest_count > 0 {
        println!("  Guests:    {}", event.guest_count);
    } else {
        println!("  Guests:    not set (planning for {})", DEFAULT_GUEST_COUNT);
    }
    println!("  Budget:    {}", format_currency(event.budget));
    println!("  Status:    {}", if event.is_finished { "finished" } else { "planning" });

    println!("\nChecklist:");
    print_checklist(conn, event)?;

    println!("\nRecommendations:");
    for tip in operations::recommend::recommendations(event) {
        println!("  * {}", tip);
    }

    println!();
    if event.budget > 0 {
        print_allocations(
            event.event_type,
            event.budget,
            config::effective_guest_count(event.guest_count),
            &event_allocations(event),
        );
    } else {
        println!("{}", NO_BUDGET_MESSAGE);
    }
    Ok(())
}

fn print_checklist(conn: &Connection, event: &EventRecord) -> AppResult<()> {
    let tasks = task_repository::get_tasks_for_event(conn, &event.id)?;
    if tasks.is_empty() {
        println!("  No tasks yet.");
    }
    for task in &tasks {
        let hint = task_budget_hint(event, &task.title)
            .map(|h| format!("  ~{} ({})", format_currency(h.amount), h.category))
            .unwrap_or_default();
        println!(
            "  [{}] #{} {} (due {}){}",
            if task.completed { "x" } else { " " },
            task.id,
            task.title,
            task.due_label(),
            hint
        );
    }
    Ok(())
}

fn print_dashboard(conn: &Connection) -> AppResult<()> {
    let events = event_repository::get_all_events(conn)?;
    let mut tasks_by_event = HashMap::new();
    for event in &events {
        tasks_by_event.insert(event.id, task_repository::get_tasks_for_event(conn, &event.id)?);
    }
    let summary = operations::dashboard::summarize(&events, &tasks_by_event);

    println!("Active events:        {}", summary.active_events);
    println!("Total guests:         {}", summary.total_guests);
    println!("Total budget tracked: {}", format_currency(summary.total_budget));
    if !summary.events.is_empty() {
        println!("\nPlanning progress:");
    }
    for progress in &summary.events {
        let filled = usize::from(progress.progress) / 5;
        println!(
            "  {:<30} {}{} {:>3}%",
            progress.title,
            "█".repeat(filled),
            "░".repeat(20 - filled),
            progress.progress
        );
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
