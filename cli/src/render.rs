use pdf_chat_client::{Message, Notification, Phase, Role, SessionView, Severity};

pub fn message(message: &Message) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };

    let mut out = format!("{}:\n", who);
    for paragraph in message.paragraphs() {
        out.push_str("  ");
        out.push_str(paragraph);
        out.push('\n');
    }
    out
}

pub fn notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    format!("[{}] {}: {}", tag, notification.title, notification.description)
}

pub fn footer(view: &SessionView) -> &'static str {
    if view.is_loaded {
        "PDF loaded and ready for questions"
    } else {
        "Please upload a PDF file first"
    }
}

pub fn prompt(view: &SessionView) -> String {
    match view.phase {
        Phase::NoFile => "pdf> ".to_string(),
        Phase::FileSelected => match &view.file_name {
            Some(name) => format!("pdf [{} - /upload to send]> ", name),
            None => "pdf> ".to_string(),
        },
        Phase::Uploading | Phase::Asking => "... ".to_string(),
        Phase::Ready => "ask> ".to_string(),
    }
}

/// What to tell someone typing while a request is still out.
pub fn busy_hint(phase: Phase) -> &'static str {
    match phase {
        Phase::Uploading => "Uploading... please wait",
        _ => "Processing... please wait",
    }
}
