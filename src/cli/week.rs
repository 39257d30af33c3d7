use anyhow::{Context, Result};
use shiftboard_week::{WeekNavigator, WeekView};

/// Prints the week containing `date` (or today in the configured timezone).
pub fn print(config: &crate::config::Config, date: Option<&str>, json: bool) -> Result<()> {
    let today = shiftboard_week::today(&config.calendar.timezone);
    let mut navigator = WeekNavigator::from_url(date, today);
    let notice = navigator.take_notice();
    let view = WeekView::new(navigator.anchor()).with_notice(notice);

    if json {
        let out = serde_json::to_string_pretty(&view).context("failed to encode week view")?;
        println!("{out}");
    } else {
        print!("{}", render_text(&view));
    }

    Ok(())
}

pub fn render_text(view: &WeekView) -> String {
    let mut out = String::new();

    if let Some(notice) = &view.notice {
        out.push_str(&notice.message());
        out.push('\n');
    }

    out.push_str(&format!("Week {}\n", view.label));
    out.push_str(&format!("Reporting {}\n", view.reporting_range));
    out.push_str(&format!(
        "Previous {}  Next {}\n",
        view.previous, view.next
    ));

    let columns: Vec<String> = view
        .header
        .iter()
        .map(|cell| format!("{} {}", cell.column, cell.day))
        .collect();
    out.push_str(&columns.join(" | "));
    out.push('\n');

    out
}
