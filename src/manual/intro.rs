//! Chapter 1: Introduction.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;

const CLIENT_FEATURES: &[&str] = &[
    "Real-time schedule viewing",
    "Interactive calendar for date selection",
    "Shift change request submission",
    "Shift swap requests with team members",
    "Employee search functionality",
    "Personal statistics and upcoming shifts",
    "Multiple theme options for personalization",
    "Mobile-responsive design",
];

const ADMIN_FEATURES: &[&str] = &[
    "Comprehensive dashboard with analytics",
    "Request approval/rejection workflow",
    "Team and employee management",
    "Google Sheets integration",
    "CSV import/export capabilities",
    "User management with role-based access",
    "Activity logging and audit trails",
    "Shift modification tracking",
];

pub(super) fn add_introduction(b: &mut DocumentBuilder, config: &ManualConfig) {
    let product = &config.product_name;
    super::chapter(b, "1. Introduction");

    b.add_heading("1.1 About This Manual", 2).add_paragraph(format!(
        "This comprehensive manual provides step-by-step instructions for using the {product}. \
         Whether you are an employee accessing your schedule or an administrator managing team \
         rosters, this guide will help you understand and utilize all features of the system \
         effectively."
    ));

    b.add_heading("1.2 System Overview", 2)
        .add_paragraph(format!(
            "The {product} is a modern web-based application designed to streamline shift \
             scheduling, request management, and team coordination. The system consists of two \
             main components:"
        ))
        .add_labeled_bullet(
            "Client Panel",
            "For employees to view schedules, request changes, and manage their shifts",
        )
        .add_labeled_bullet(
            "Admin Panel",
            "For administrators to manage rosters, approve requests, and oversee operations",
        );

    b.add_heading("1.3 Key Features", 2)
        .add_bold_paragraph("Client Panel Features:");
    for feature in CLIENT_FEATURES {
        b.add_bullet_level(*feature, 1);
    }
    b.add_bold_paragraph("Admin Panel Features:");
    for feature in ADMIN_FEATURES {
        b.add_bullet_level(*feature, 1);
    }

    b.add_page_break();
}
