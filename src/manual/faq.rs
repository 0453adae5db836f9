//! Chapter 5: Frequently Asked Questions.

use crate::builder::DocumentBuilder;
use crate::model::TextRun;

const GENERAL: &[(&str, &str)] = &[
    (
        "What browsers are supported?",
        "The system works best on modern browsers including Chrome, Firefox, Safari, and Edge. \
         We recommend using the latest version of Chrome for the best experience.",
    ),
    (
        "Is the system mobile-friendly?",
        "Yes! The system is fully responsive and works on mobile devices, tablets, and desktops. \
         The interface adapts to your screen size.",
    ),
    (
        "How often is the data updated?",
        "If auto-sync is enabled, data is synchronized from Google Sheets every hour. You can \
         also manually refresh at any time using the Refresh button.",
    ),
    (
        "Can I access the system from home?",
        "Yes, if your organization has made the system accessible externally. Contact your IT \
         department for the correct URL and VPN requirements if needed.",
    ),
];

const CLIENT: &[(&str, &str)] = &[
    (
        "Why can't I log in?",
        "Make sure you are entering your Employee ID correctly (format: SLL-XXXXX). The ID is \
         case-sensitive. Also verify that the password is \"cartup123\". If issues persist, \
         contact your administrator.",
    ),
    (
        "How do I know if my request was approved?",
        "Check the \"Shift Changes\" stat card on your dashboard. Approved changes will be \
         reflected there. You can also check your schedule - approved changes will show the new \
         shift.",
    ),
    (
        "Can I cancel a request after submitting?",
        "Currently, you cannot cancel a request yourself. Contact your administrator if you need \
         to cancel a pending request.",
    ),
    (
        "Why can't I request a swap with someone?",
        "You can only swap shifts with team members from your own team. The system will only \
         show employees from your team in the swap request search.",
    ),
    (
        "What do the shift codes mean?",
        "M2 (8 AM-5 PM), M3 (9 AM-6 PM), M4 (10 AM-7 PM), D1 (12 PM-9 PM), D2 (1 PM-10 PM), \
         DO (Day Off), SL (Sick Leave), CL (Casual Leave), EL (Emergency Leave), HL (Holiday \
         Leave).",
    ),
];

const ADMIN: &[(&str, &str)] = &[
    (
        "How do I add a new employee to the system?",
        "Go to Team Management tab, select the team, click \"Add Employee\", fill in the details \
         (Name, ID, Team), and save. The employee will appear in the roster immediately.",
    ),
    (
        "What happens when I approve a shift change request?",
        "The employee's shift is immediately updated in the admin roster. The change is logged \
         in the modification history and appears in the activity feed.",
    ),
    (
        "Can I undo a shift modification?",
        "Yes, you can manually change the shift back to the original value, or use the \"Reset \
         to Google\" button to reset all modifications at once (warning: this resets ALL \
         changes).",
    ),
    (
        "How do I bulk import employee schedules?",
        "Use the CSV Import tab. Download the template, fill it with your data following the \
         format, then upload it. Select the correct month before uploading.",
    ),
    (
        "What's the difference between Google Data and Admin Data?",
        "Google Data is the original roster from Google Sheets (read-only). Admin Data includes \
         all modifications made by administrators. The system displays a merge of both.",
    ),
];

const TROUBLESHOOTING: &[(&str, &str)] = &[
    (
        "Page not loading or showing errors",
        "Try refreshing the page (F5). Clear your browser cache. Check your internet \
         connection. If the issue persists, contact IT support.",
    ),
    (
        "Data not updating after sync",
        "Click the manual refresh button. Check if the Google Sheets links are correctly \
         configured. Verify that the Google Sheet is published correctly as CSV.",
    ),
    (
        "Cannot upload CSV file",
        "Ensure the file is in CSV format (.csv extension). Check that the file follows the \
         template format. File size should not exceed 5MB. Try a different browser.",
    ),
    (
        "Theme not applying correctly",
        "Clear your browser cache. Try selecting the theme again. Check if JavaScript is \
         enabled in your browser settings.",
    ),
    (
        "Forgot admin password",
        "Contact a Super Admin to reset your password through the User Management tab. Super \
         Admins can reset passwords for other users.",
    ),
];

pub(super) fn add_faq(b: &mut DocumentBuilder) {
    super::chapter(b, "5. Frequently Asked Questions (FAQ)");

    b.add_heading("5.1 General Questions", 2);
    add_entries(b, GENERAL, "Q", "A");

    b.add_heading("5.2 Client Panel Questions", 2);
    add_entries(b, CLIENT, "Q", "A");

    b.add_heading("5.3 Admin Panel Questions", 2);
    add_entries(b, ADMIN, "Q", "A");

    b.add_heading("5.4 Troubleshooting", 2);
    add_entries(b, TROUBLESHOOTING, "Issue", "Solution");
}

/// Bold "prompt: ..." line, plain "answer: ..." line, blank spacer.
fn add_entries(b: &mut DocumentBuilder, entries: &[(&str, &str)], prompt: &str, answer: &str) {
    for (question, reply) in entries {
        b.add_runs(vec![TextRun::bold(format!("{}: {}", prompt, question))])
            .add_paragraph(format!("{}: {}", answer, reply))
            .add_empty_paragraph();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[test]
    fn test_question_and_answer_pairs() {
        let mut b = DocumentBuilder::new();
        add_faq(&mut b);
        let doc = b.build();
        let texts: Vec<String> = doc
            .blocks()
            .filter_map(|block| match block {
                Block::Paragraph(p) if !p.is_heading() => Some(p.plain_text()),
                _ => None,
            })
            .collect();

        assert_eq!(texts.len(), (4 + 5 + 5 + 5) * 3);
        assert_eq!(texts[0], "Q: What browsers are supported?");
        assert!(texts[1].starts_with("A: The system works best"));
        assert_eq!(texts[2], "");
        assert_eq!(texts[texts.len() - 3], "Issue: Forgot admin password");
        assert!(texts[texts.len() - 2].starts_with("Solution: Contact a Super Admin"));
    }

    #[test]
    fn test_questions_are_bold() {
        let mut b = DocumentBuilder::new();
        add_entries(&mut b, &CLIENT[..1], "Q", "A");
        let doc = b.build();
        let Some(Block::Paragraph(question)) = doc.blocks().next() else {
            panic!("expected a paragraph");
        };
        assert!(question.runs[0].style.bold);
        assert_eq!(question.plain_text(), "Q: Why can't I log in?");
    }
}
