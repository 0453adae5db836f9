//! Chapter 3: Admin Panel User Guide.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;
use crate::model::Row;

use super::GRID_TABLE_STYLE;

/// (role, username, password) for the accounts seeded in a fresh install.
const DEFAULT_CREDENTIALS: &[(&str, &str, &str)] = &[
    ("Super Admin", "Username: developer", "Password: devneversleeps"),
    ("Admin", "Username: istiaque", "Password: cartup123"),
    ("Admin", "Username: admin", "Password: password123"),
];

pub(super) fn add_admin_guide(b: &mut DocumentBuilder, config: &ManualConfig) {
    super::chapter(b, "3. Admin Panel User Guide");
    add_admin_login(b, config);
    add_dashboard_tab(b);
    add_schedule_requests_tab(b);
    add_data_sync_tab(b);
    add_google_sheets_tab(b);
    add_roster_data_tab(b);
    add_csv_tab(b);
    add_profile_tab(b);
    add_team_management_tab(b);
    add_user_management_tab(b);
}

fn add_admin_login(b: &mut DocumentBuilder, config: &ManualConfig) {
    let rows = DEFAULT_CREDENTIALS
        .iter()
        .map(|&(role, username, password)| Row::from_texts([role, username, password]))
        .collect();

    b.add_heading("3.1 Admin Login", 2)
        .add_paragraph(
            "Administrators access a separate panel with advanced features for managing the \
             entire roster system.",
        )
        .add_bold_paragraph("Default Admin Credentials:")
        .add_table(
            Some(Row::header(["Role", "Username", "Password"])),
            rows,
            GRID_TABLE_STYLE,
        )
        .add_empty_paragraph()
        .add_bold_paragraph("Steps to login:")
        .add_enumerated([
            format!("Navigate to {}/admin/login", config.app_url),
            "Enter your admin username".to_string(),
            "Enter your password".to_string(),
            "Click \"Login\"".to_string(),
            "You will be redirected to the admin dashboard".to_string(),
        ]);
}

fn add_dashboard_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.2 Dashboard Tab", 2)
        .add_paragraph(
            "The admin dashboard provides an overview of the entire roster system with key \
             metrics and recent activity.",
        )
        .add_bold_paragraph("Dashboard Components:")
        .add_labeled_bullet(
            "👥 Total Employees This Month",
            "Shows the total number of employees in the system.",
        )
        .add_labeled_bullet(
            "👷 Employees Working Today",
            "Displays count of employees with shifts today. Click to see the full list with \
             their shifts.",
        )
        .add_labeled_bullet(
            "Shift Change / Swap Requests Overview",
            "Statistics card showing pending, approved, and rejected requests. Click to expand \
             for details.",
        )
        .add_labeled_bullet(
            "Team Health Overview",
            "Shows team distribution and metrics. Expand to see detailed team information.",
        )
        .add_labeled_bullet(
            "Activity Log",
            "Recent actions including approved requests, rejected requests, and shift \
             modifications. Shows admin username who performed each action.",
        )
        .add_empty_paragraph()
        .add_callout(
            "How to use:",
            "Click on any stat card to expand it and view detailed information. The activity \
             log updates automatically as changes are made.",
        );
}

fn add_schedule_requests_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.3 Schedule Requests Tab", 2)
        .add_paragraph(
            "This tab is where administrators review and process shift change and swap \
             requests from employees.",
        )
        .add_bold_paragraph("Request Management:")
        .add_numbered_list([
            "Click on the \"Schedule Requests\" tab in the sidebar",
            "You will see a list of all requests",
            "Use the filter buttons to view: All, Pending, Approved, Rejected",
            "For each request, you can see:",
            "  - Employee name and ID",
            "  - Request type (Shift Change or Swap)",
            "  - Requested date",
            "  - Current shift and requested shift",
            "  - Reason provided by employee",
            "  - Request submission date",
            "To approve a request: Click the \"✅ Approve\" button",
            "To reject a request: Click the \"❌ Reject\" button",
            "You will be asked to confirm your action",
            "Once processed, the request status updates immediately",
            "The employee's schedule is updated for approved requests",
        ])
        .add_empty_paragraph()
        .add_callout(
            "Important:",
            "All actions are logged and cannot be undone. Approved shift changes immediately \
             update the roster.",
        );
}

fn add_data_sync_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.4 Data Sync Tab", 2)
        .add_paragraph(
            "The Data Sync tab allows you to synchronize roster data from Google Sheets and \
             manage automatic synchronization settings.",
        )
        .add_bold_paragraph("Features:")
        .add_labeled_bullet(
            "Manual Sync Button",
            "Click to immediately fetch and update data from all configured Google Sheets links.",
        )
        .add_labeled_bullet(
            "Auto-Sync Toggle",
            "Enable or disable automatic synchronization that runs at regular intervals.",
        )
        .add_labeled_bullet("Last Sync Time", "Shows when the last successful sync occurred.")
        .add_labeled_bullet(
            "Sync Statistics",
            "Displays number of employees and sheets synced.",
        )
        .add_bold_paragraph("How to perform a manual sync:")
        .add_enumerated([
            "Navigate to the Data Sync tab",
            "Click the \"Sync Now\" button",
            "Wait for the sync to complete",
            "A success message will appear",
            "Check the sync statistics to verify",
        ]);
}

fn add_google_sheets_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.5 Google Sheets Tab", 2)
        .add_paragraph(
            "Configure Google Sheets links for roster data import. The system supports multiple \
             sheets to aggregate data from different teams or sources.",
        )
        .add_bold_paragraph("Managing Google Sheets Links:")
        .add_bold_paragraph("To add a new link:")
        .add_enumerated([
            "Click on the \"Google Sheets\" tab",
            "Enter a descriptive name for the sheet (e.g., \"Voice Team Roster\")",
            "Paste the published CSV link from your Google Sheet",
            "Click \"Add Link\"",
            "The link will be saved and used for future syncs",
        ])
        .add_bold_paragraph("To delete a link:")
        .add_enumerated([
            "Find the link in the list",
            "Click the \"Delete\" button next to it",
            "Confirm the deletion",
        ])
        .add_empty_paragraph()
        .add_bold_paragraph("How to get a Google Sheets CSV link:")
        .add_enumerated([
            "Open your Google Sheet",
            "Go to File → Share → Publish to web",
            "Select \"Comma-separated values (.csv)\"",
            "Click \"Publish\"",
            "Copy the generated URL",
        ]);
}

fn add_roster_data_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.6 Roster Data Tab", 2)
        .add_paragraph(
            "The Roster Data tab provides an interactive interface to view and edit employee \
             shifts directly.",
        )
        .add_bold_paragraph("Features:")
        .add_labeled_bullet(
            "Data Source Toggle",
            "Switch between viewing Google Sheets roster (original) and Admin modified roster.",
        )
        .add_labeled_bullet(
            "Shift View Button",
            "Open a calendar-based view of the entire roster.",
        )
        .add_labeled_bullet(
            "Reset to Google Button",
            "Reset all admin modifications and revert to the original Google Sheets data.",
        )
        .add_labeled_bullet(
            "Date Selection",
            "Select any date to view and modify shifts for that day.",
        )
        .add_labeled_bullet(
            "Employee List",
            "View all employees with their shifts for the selected date.",
        )
        .add_labeled_bullet("Shift Editing", "Click on any employee shift cell to change it.")
        .add_bold_paragraph("How to modify a shift:")
        .add_enumerated([
            "Go to the Roster Data tab",
            "Select \"Admin Data\" to edit the modifiable roster",
            "Click \"Select Date to Modify Shifts\"",
            "Choose a date from the calendar",
            "Find the employee whose shift you want to change",
            "Click on their current shift code",
            "A dropdown will appear with all available shift codes",
            "Select the new shift",
            "The change is saved automatically",
            "The modification is tracked and logged",
        ]);
}

fn add_csv_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.7 CSV Import/Export Tab", 2)
        .add_paragraph(
            "Import and export roster data in CSV format for backup, bulk editing, or \
             integration with external systems.",
        )
        .add_bold_paragraph("CSV Import:")
        .add_enumerated([
            "Click on \"CSV Import\" tab",
            "Click \"Choose File\" or drag and drop a CSV file",
            "The file should follow the template format",
            "Select the month this data is for",
            "Click \"Upload CSV\"",
            "The system will process and import the data",
            "A success message confirms the import",
        ])
        .add_bold_paragraph("CSV Export:")
        .add_enumerated([
            "Go to the CSV Import tab",
            "Select specific months to export or choose \"Export All\"",
            "Click \"📥 Export CSV\"",
            "The file will be generated and downloaded",
            "Open the file in Excel or any spreadsheet application",
        ])
        .add_empty_paragraph()
        .add_callout(
            "CSV Format:",
            "The CSV must have columns for Employee Name, Employee ID, Team, and date columns \
             with shift codes.",
        );
}

fn add_profile_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.8 My Profile Tab", 2)
        .add_paragraph("Manage your admin account information and change your password.")
        .add_bold_paragraph("Profile Information:")
        .add_bullets([
            "Username (read-only)",
            "Role (read-only)",
            "Change password functionality",
        ])
        .add_bold_paragraph("How to change your password:")
        .add_enumerated([
            "Go to the \"My Profile\" tab",
            "Enter your current password",
            "Enter your new password",
            "Re-enter the new password to confirm",
            "Click \"Change Password\"",
            "You will receive a confirmation message",
            "Use your new password for future logins",
        ]);
}

fn add_team_management_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.9 Team Management Tab", 2)
        .add_paragraph(
            "Manage teams and employees, including adding new employees, modifying information, \
             and organizing team structures.",
        )
        .add_bold_paragraph("Team Management Features:")
        .add_bold_paragraph("Adding a new team:")
        .add_enumerated([
            "Click on \"Team Management\" tab",
            "Click \"Add New Team\" button",
            "Enter the team name",
            "Optionally add a description",
            "Click \"Save\"",
            "The team will appear in the list",
        ])
        .add_bold_paragraph("Adding a new employee:")
        .add_enumerated([
            "Select the team from the dropdown",
            "Click \"Add Employee\"",
            "Fill in employee details:",
            "  - Full Name",
            "  - Employee ID (format: SLL-XXXXX)",
            "  - Team assignment",
            "Click \"Save Employee\"",
            "The employee will be added to the roster",
        ])
        .add_bold_paragraph("Modifying employee information:")
        .add_enumerated([
            "Find the employee in the list",
            "Click \"Edit\" next to their name",
            "Update the information",
            "Click \"Save Changes\"",
        ]);
}

fn add_user_management_tab(b: &mut DocumentBuilder) {
    b.add_heading("3.10 User Management Tab", 2)
        .add_paragraph(
            "Manage administrator accounts, including creating new users, updating roles, and \
             deleting accounts. Note: This tab is only visible to Super Admins and Admins.",
        )
        .add_bold_paragraph("User Roles:")
        .add_labeled_bullet("super_admin", "Full system access including user management")
        .add_labeled_bullet(
            "admin",
            "Can manage rosters and requests, view user management",
        )
        .add_labeled_bullet("team_leader", "Limited access to team-specific functions")
        .add_bold_paragraph("Adding a new admin user:")
        .add_enumerated([
            "Go to the \"User Management\" tab",
            "Click \"Add New User\"",
            "Fill in the form:",
            "  - Username (unique)",
            "  - Password",
            "  - Confirm Password",
            "  - Select Role",
            "Click \"Create User\"",
            "The user can now log in with these credentials",
        ])
        .add_bold_paragraph("Deleting a user:")
        .add_enumerated([
            "Find the user in the list",
            "Click the \"Delete\" button",
            "Confirm the deletion",
            "The user account will be permanently removed",
        ]);
}
