use colored::Colorize;

use crate::habits::WeekReference;
use crate::stats::{DashboardStats, DayCell, HabitView, WeekOverview};

const PROGRESS_WIDTH: usize = 20;

/// Render a percentage as a fixed-width bar.
pub fn render_progress_bar(rate: u8, width: usize) -> String {
    let filled = (usize::from(rate.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn format_cell(cell: &DayCell) -> String {
    let mark = if cell.is_completed { " ✓ " } else { " · " };
    let mark = if cell.is_completed {
        mark.green().bold()
    } else {
        mark.dimmed()
    };
    if cell.is_today {
        format!("[{mark}]")
    } else {
        format!(" {mark} ")
    }
}

fn format_header(view: &HabitView) -> String {
    view.days
        .iter()
        .map(|cell| {
            let label = format!("{} {:>2}", cell.weekday, cell.date.format("%-d"));
            if cell.is_today {
                label.bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format one habit with its week grid and streaks.
pub fn format_habit_pretty(view: &HabitView) -> String {
    let mut output = format!("{} {}\n", format!("#{}", view.id).dimmed(), view.name.bold());
    output.push_str(&format!("  {}\n", format_header(view)));
    output.push_str("  ");
    output.push_str(
        &view
            .days
            .iter()
            .map(format_cell)
            .collect::<Vec<_>>()
            .join(" "),
    );
    output.push('\n');
    output.push_str(&format!(
        "  {} {}%\n",
        render_progress_bar(view.weekly_rate, PROGRESS_WIDTH).cyan(),
        view.weekly_rate
    ));
    output.push_str(&format!(
        "  🔥 Current: {}  🏆 Best: {}\n",
        streak_text(view.current_streak),
        view.best_streak
    ));
    output
}

fn streak_text(days: u32) -> String {
    if days > 0 {
        days.to_string().green().to_string()
    } else {
        "0".dimmed().to_string()
    }
}

/// Format the dashboard summary.
pub fn format_dashboard_pretty(stats: &DashboardStats, week: Option<&WeekReference>) -> String {
    let mut output = format!("{}\n", "📊 Summary".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("Total habits:     {}\n", stats.total_habits));
    output.push_str(&format!(
        "Completed today:  {}\n",
        stats.completed_today.to_string().green()
    ));
    output.push_str(&format!("Longest streak:   {}\n", stats.longest_streak));
    output.push_str(&format!("Weekly rate:      {}%", stats.weekly_rate));
    if let Some(week) = week {
        output.push_str(&format!("  {}", week.label().dimmed()));
    }
    output.push('\n');
    output
}

/// Format the full weekly screen.
pub fn format_overview_pretty(overview: &WeekOverview) -> String {
    let week = WeekReference::starting_at(overview.week_start);
    let mut output = format!("Week of {}\n", week.label().bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if overview.habits.is_empty() {
        output.push_str("  No habits yet!\n");
        output.push_str(&format!(
            "  {}\n",
            "Add your first habit with 'habitgrid add <name>'.".dimmed()
        ));
    } else {
        for view in &overview.habits {
            output.push_str(&format_habit_pretty(view));
            output.push('\n');
        }
    }

    output.push_str(&format_dashboard_pretty(&overview.dashboard, None));
    output
}
