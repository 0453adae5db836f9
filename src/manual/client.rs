//! Chapter 2: Client Panel User Guide.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;

use super::{screenshot, screenshots};

pub(super) fn add_client_guide(b: &mut DocumentBuilder, config: &ManualConfig) {
    super::chapter(b, "2. Client Panel User Guide");
    add_logging_in(b, config);
    add_dashboard(b, config);
    add_refresh(b, config);
    add_themes(b, config);
    add_calendar(b, config);
    add_shift_change(b, config);
    add_swap_request(b);
    add_shift_view(b);
    add_employee_search(b);
    add_stat_cards(b);
}

fn add_logging_in(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.1 Logging In to the Client Panel", 2)
        .add_paragraph(
            "To access your schedule and manage your shifts, you need to log in to the Client Panel.",
        )
        .add_bold_paragraph("Steps:")
        .add_numbered_list([
            format!(
                "Navigate to the application URL ({} or your organization URL)",
                config.app_url
            ),
            "Enter your Full Name in the first field".to_string(),
            "Enter your Employee ID in the format SLL-XXXXX".to_string(),
            "The team password is pre-filled as \"cartup123\"".to_string(),
            "Click the \"🔓 Access Roster\" button".to_string(),
            "You will be redirected to your personal dashboard".to_string(),
        ]);
    screenshot(b, config, "client/01_client_login_page.png");
    b.add_empty_paragraph().add_callout(
        "Note:",
        "The Employee ID is case-sensitive. Make sure to enter it exactly as provided.",
    );
}

fn add_dashboard(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.2 Dashboard Overview", 2)
        .add_paragraph("Once logged in, you will see your personalized dashboard displaying:")
        .add_labeled_bullet("Welcome Header", "Shows your name and Employee ID")
        .add_labeled_bullet("Action Buttons", "Logout, Refresh, and Theme buttons")
        .add_labeled_bullet("Current Shift Information", "Today and tomorrow shift details")
        .add_labeled_bullet(
            "Selected Date Shift",
            "Shows shift for any selected calendar date",
        )
        .add_labeled_bullet(
            "Action Buttons Row",
            "Request Shift Change, Request Swap, and Shift View buttons",
        )
        .add_labeled_bullet(
            "Employee Search",
            "Search bar to find and view other employees' schedules",
        )
        .add_labeled_bullet(
            "Statistics Cards",
            "Upcoming Days, Planned Time Off, and Shift Changes",
        );
    screenshot(b, config, "client/02_client_dashboard_main.png");
}

fn add_refresh(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.3 Refresh Function", 2)
        .add_paragraph(
            "The Refresh button allows you to reload your schedule data to see the most \
             up-to-date information including any recently approved shift changes.",
        )
        .add_bold_paragraph("How to use:")
        .add_numbered_list([
            "Locate the \"🔄 Refresh\" button in the top action bar",
            "Click the button",
            "The system will reload all schedule data",
            "The button will show \"Refreshing...\" while loading",
            "Once complete, all information will be updated",
        ]);
    screenshot(b, config, "client/03_after_refresh.png");
}

fn add_themes(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.4 Theme Customization", 2)
        .add_paragraph(
            "The system offers multiple color themes to personalize your experience. You can \
             switch between different themes to find one that suits your preference.",
        )
        .add_bold_paragraph("Available Themes:")
        .add_bullets([
            "🌈 Bright Vibrant - Colorful and energetic",
            "🌅 Bright Sunset - Warm and inviting",
            "🌊 Medium Ocean - Cool blue tones",
            "🌍 Medium Earth - Natural earth tones",
            "🍃 Peaceful Sage - Calming green",
            "💜 Peaceful Lavender - Soft purple",
            "🌑 Dark Blue - Professional dark blue",
            "🌃 Dark Midnight - Deep dark theme",
            "🕳️ Dark Void - Maximum contrast black",
        ])
        .add_bold_paragraph("How to change theme:")
        .add_numbered_list([
            "Click the \"🎨 Theme\" button in the top action bar",
            "A dropdown menu will appear showing all available themes",
            "Click on any theme to apply it immediately",
            "The entire website will update with the new color scheme",
            "Your selection is saved and will persist across sessions",
        ]);
    screenshots(
        b,
        config,
        &[
            ("Theme menu", "client/04_theme_menu_open.png"),
            ("Theme applied", "client/05_theme_changed_ocean.png"),
        ],
    );
}

fn add_calendar(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.5 Calendar Feature", 2)
        .add_paragraph(
            "The calendar allows you to view your shift schedule for any date. When you select \
             a date, the system displays your assigned shift for that day.",
        )
        .add_bold_paragraph("How to use the calendar:")
        .add_numbered_list([
            "Click the \"📅 Show Calendar\" button",
            "The calendar will expand, showing the current month",
            "Use the arrow buttons (← →) to navigate between months",
            "Click on any date to view your shift for that day",
            "The selected date and shift will appear above the calendar",
            "Click \"📅 Hide Calendar\" to collapse the calendar",
        ]);
    screenshots(
        b,
        config,
        &[
            ("Calendar opened", "client/06_calendar_opened.png"),
            ("October view", "client/07_calendar_october.png"),
            ("Date selected", "client/08_date_selected_oct20.png"),
        ],
    );
}

fn add_shift_change(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading("2.6 Requesting Shift Changes", 2)
        .add_paragraph(
            "If you need to change your assigned shift for a specific date, you can submit a \
             shift change request through the system. An administrator will review and approve \
             or reject your request.",
        )
        .add_bold_paragraph("Step-by-step process:")
        .add_enumerated([
            "Click the \"✏️ Request Shift Change\" button on the dashboard",
            "The Shift Change Request modal will open",
            "You will see your employee information and current team displayed",
            "Select the date for which you want to change your shift using the mini calendar",
            "Use the arrow buttons to navigate to the correct month if needed",
            "Click on the desired date",
            "Your current shift for that date will be displayed",
            "Select your requested shift from the dropdown menu (M2, M3, M4, D1, D2, DO, SL, CL, EL, HL)",
            "Enter a reason for your request in the text area",
            "Click \"Submit Request\" to send your request to administrators",
            "Click \"Cancel\" if you want to close the modal without submitting",
        ]);
    screenshot(b, config, "client/09_shift_change_modal_opened.png");
    b.add_empty_paragraph().add_callout(
        "Important:",
        "All shift change requests require administrator approval. You will be notified once \
         your request is processed.",
    );
}

fn add_swap_request(b: &mut DocumentBuilder) {
    b.add_heading("2.7 Requesting Shift Swaps", 2)
        .add_paragraph(
            "A shift swap allows you to exchange shifts with another team member. Both the \
             requester and the target employee must be on the same team for a swap to be \
             processed.",
        )
        .add_bold_paragraph("How to request a swap:")
        .add_enumerated([
            "Click the \"🔁 Request Swap\" button on the dashboard",
            "The Swap Request modal will open",
            "Select the date for the swap using the calendar",
            "Your current shift for that date will be displayed",
            "In the \"Swap With\" field, start typing an employee name or ID",
            "A list of team members will appear as you type",
            "Select the employee you want to swap with",
            "Enter a reason for the swap request",
            "Click \"Submit Swap Request\"",
            "The request will be sent to administrators for approval",
        ])
        .add_empty_paragraph()
        .add_callout(
            "Note:",
            "The system will only show employees from your team in the search suggestions. \
             Cross-team swaps are not currently supported.",
        );
}

fn add_shift_view(b: &mut DocumentBuilder) {
    b.add_heading("2.8 Shift View", 2)
        .add_paragraph(
            "The Shift View feature provides a comprehensive calendar-style view of team \
             schedules, allowing you to see who is working on specific dates.",
        )
        .add_bold_paragraph("Using Shift View:")
        .add_enumerated([
            "Click the \"👁️ Shift View\" button",
            "The Shift View modal will open showing a calendar",
            "Select a date from the calendar to view all shifts for that day",
            "You can filter by team using the team dropdown",
            "The view shows all employees and their assigned shifts",
            "Use the arrow buttons to navigate between months",
            "Click outside the modal or the close button to exit",
        ])
        .add_empty_paragraph()
        .add_callout(
            "Tip:",
            "Use this feature to coordinate with team members and plan coverage.",
        );
}

fn add_employee_search(b: &mut DocumentBuilder) {
    b.add_heading("2.9 Employee Search", 2)
        .add_paragraph(
            "The employee search feature allows you to look up any employee in the system and \
             view their schedule.",
        )
        .add_bold_paragraph("How to search for employees:")
        .add_enumerated([
            "Locate the \"Search Other Employees\" section on the dashboard",
            "Click in the search box",
            "Start typing an employee name, ID, or team name",
            "A dropdown list of matching employees will appear",
            "Click on an employee from the list",
            "Their schedule will replace yours on the dashboard temporarily",
            "You can select dates from the calendar to see their shifts",
            "Click the \"← Back to My Schedule\" button to return to your own schedule",
        ])
        .add_empty_paragraph()
        .add_callout(
            "Use case:",
            "This is useful for checking if a colleague is available on a specific day before \
             requesting a swap.",
        );
}

fn add_stat_cards(b: &mut DocumentBuilder) {
    b.add_heading("2.10 Statistics Cards", 2)
        .add_paragraph(
            "The bottom of your dashboard displays three statistics cards that provide quick \
             insights into your schedule:",
        )
        .add_labeled_bullet(
            "📅 Upcoming Days",
            "Shows the number of working days in the next 7 days. Click to expand and see the \
             list of dates you are scheduled to work.",
        )
        .add_labeled_bullet(
            "🏖️ Planned Time Off",
            "Displays your time off days (DO, SL, CL, EL, HL) within the next 30 days. Click to \
             expand and see all your scheduled off days with their types.",
        )
        .add_labeled_bullet(
            "🔄 Shift Changes",
            "Shows the number of shifts that have been modified from the original Google Sheets \
             roster. Click to expand and see details of what changed and when.",
        )
        .add_bold_paragraph("How to use:")
        .add_enumerated([
            "Click on any card to expand it",
            "The card will show detailed information",
            "Click the \"▲\" arrow or anywhere outside to collapse",
        ])
        .add_empty_paragraph()
        .add_callout(
            "Tip:",
            "Check these cards regularly to stay aware of your upcoming schedule and any changes.",
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, ListType, Paragraph};

    fn build() -> Vec<Paragraph> {
        let mut b = DocumentBuilder::new();
        add_client_guide(&mut b, &ManualConfig::default());
        b.build()
            .blocks()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_login_steps_are_a_numbered_list() {
        let paras = build();
        let steps: Vec<&Paragraph> = paras
            .iter()
            .skip_while(|p| p.plain_text() != "Steps:")
            .skip(1)
            .take_while(|p| p.is_list_item())
            .collect();
        assert_eq!(steps.len(), 6);
        assert!(steps[0]
            .plain_text()
            .contains("(http://localhost:3000 or your organization URL)"));
        let last = steps[5].list_info.as_ref().expect("list item");
        assert_eq!(last.list_type, ListType::Numbered);
        assert_eq!(last.number, Some(6));
    }

    #[test]
    fn test_shift_change_steps_are_literal() {
        let paras = build();
        assert!(paras
            .iter()
            .any(|p| p.plain_text() == "11. Click \"Cancel\" if you want to close the modal without submitting"
                && !p.is_list_item()));
    }

    #[test]
    fn test_callouts_have_bold_labels() {
        let paras = build();
        let labels: Vec<&str> = paras
            .iter()
            .filter(|p| p.runs.len() == 2 && p.runs[0].style.bold && !p.is_list_item())
            .map(|p| p.runs[0].text.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["Note: ", "Important: ", "Note: ", "Tip: ", "Use case: ", "Tip: "]
        );
    }

    #[test]
    fn test_screenshot_references() {
        let paras = build();
        let shots: Vec<String> = paras
            .iter()
            .map(|p| p.plain_text())
            .filter(|t| t.contains("MANUAL_SCREENSHOTS/client/"))
            .collect();
        assert_eq!(shots.len(), 9);
        assert_eq!(
            shots[0],
            "📸 Screenshot: See MANUAL_SCREENSHOTS/client/01_client_login_page.png"
        );
        assert_eq!(
            shots[3],
            "- Theme menu: MANUAL_SCREENSHOTS/client/04_theme_menu_open.png"
        );
    }
}
