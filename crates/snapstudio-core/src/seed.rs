//! Demo dataset for evaluation sessions
//!
//! Mirrors the sample agency the dashboard ships with so a fresh install has
//! something to render.

use crate::models::{
    Activity, ActivityKind, ActivityStatus, Channel, Contact, Conversation, Priority, Workflow,
    WorkflowPerformance, WorkflowStatus,
};
use crate::store::DataStore;
use chrono::{Duration, Utc};

/// Populate a store with the demo agency dataset
pub fn populate_demo_data(store: &DataStore) {
    let now = Utc::now();

    // Contacts
    let contacts = [
        ("Sarah Johnson", "sarah.johnson@example.com", vec!["Hot Lead", "Services"]),
        ("Mike Chen", "mike.chen@example.com", vec!["Customer"]),
        ("Emily Rodriguez", "emily.rodriguez@example.com", vec!["Follow-up"]),
        ("David Park", "david.park@example.com", vec!["Customer", "Referral"]),
    ];
    for (name, email, tags) in contacts {
        store.insert_contact(
            Contact::new(name)
                .with_email(email)
                .with_tags(tags.into_iter().map(String::from).collect()),
        );
    }

    // Conversations
    let conversations = [
        (
            "Sarah Johnson",
            "SJ",
            "I'm interested in your marketing services. Can we schedule a call?",
            Channel::Email,
            Duration::minutes(2),
            2u32,
            Priority::High,
            vec!["Hot Lead", "Services"],
        ),
        (
            "Mike Chen",
            "MC",
            "Thanks for the quick response!",
            Channel::Sms,
            Duration::hours(1),
            0,
            Priority::Medium,
            vec!["Customer"],
        ),
        (
            "Emily Rodriguez",
            "ER",
            "Missed call - Left voicemail",
            Channel::Phone,
            Duration::hours(3),
            1,
            Priority::High,
            vec!["Follow-up"],
        ),
    ];
    for (name, initials, message, channel, age, unread, priority, tags) in conversations {
        let timestamp = now - age;
        store.insert_conversation(Conversation {
            id: uuid::Uuid::new_v4().to_string(),
            contact_name: name.to_string(),
            contact_initials: initials.to_string(),
            contact_avatar: None,
            last_message_content: message.to_string(),
            last_message_timestamp: timestamp,
            last_message_channel: channel,
            unread_count: unread,
            priority,
            tags: tags.into_iter().map(String::from).collect(),
            created_at: timestamp,
            updated_at: timestamp,
        });
    }

    // Workflows
    let workflows = [
        (
            "Lead Nurture Sequence",
            WorkflowStatus::Active,
            "Form Submission",
            7u32,
            142u32,
            Some(Duration::minutes(2)),
            WorkflowPerformance { opens: 89, clicks: 34, conversions: 12 },
        ),
        (
            "Appointment Reminder",
            WorkflowStatus::Active,
            "Booking Confirmed",
            3,
            28,
            Some(Duration::minutes(15)),
            WorkflowPerformance { opens: 95, clicks: 23, conversions: 28 },
        ),
        (
            "Re-engagement Campaign",
            WorkflowStatus::Paused,
            "30 Days Inactive",
            5,
            89,
            Some(Duration::hours(1)),
            WorkflowPerformance { opens: 67, clicks: 18, conversions: 7 },
        ),
    ];
    for (name, status, trigger, actions, contacts, last_run_age, performance) in workflows {
        let mut workflow = Workflow::new(name, status, trigger);
        workflow.actions = actions;
        workflow.contacts = contacts;
        workflow.last_run = last_run_age.map(|age| now - age);
        workflow.performance = performance;
        store.insert_workflow(workflow);
    }

    // Activity feed
    let activities = [
        (
            ActivityKind::Message,
            "Email sent to lead",
            "Welcome sequence email delivered to Sarah Johnson",
            Duration::minutes(2),
            Some(("Sarah Johnson", "SJ")),
        ),
        (
            ActivityKind::Workflow,
            "Automation triggered",
            "Lead nurture workflow started for new form submission",
            Duration::minutes(5),
            None,
        ),
        (
            ActivityKind::Meeting,
            "Appointment booked",
            "Mike Chen scheduled a consultation for tomorrow",
            Duration::minutes(15),
            Some(("Mike Chen", "MC")),
        ),
        (
            ActivityKind::Opportunity,
            "Deal moved to proposal",
            "Marketing services opportunity advanced in pipeline",
            Duration::hours(1),
            None,
        ),
        (
            ActivityKind::Review,
            "New 5-star review",
            "Emily Rodriguez left a positive review on Google",
            Duration::hours(2),
            Some(("Emily Rodriguez", "ER")),
        ),
    ];
    for (kind, title, description, age, contact) in activities {
        let mut entry = Activity::now(kind, title, description).with_status(ActivityStatus::Success);
        entry.timestamp = now - age;
        entry.created_at = entry.timestamp;
        if let Some((name, initials)) = contact {
            entry = entry.with_contact(Some(name.to_string()), Some(initials.to_string()));
        }
        store.record_activity(entry);
    }
}
