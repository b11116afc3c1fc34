//! Command handlers for the Postbox CLI.

use std::io::Write;

use anyhow::{Context, Result};
use postbox_api::Transport;
use postbox_core::{
    DeliveryOutcome, Inbox, MailApi, Message, OutgoingMessage, SendError, SendReport, SessionId,
    delete_message, fetch_detail, list_messages, login_and_fetch_inbox, parse_recipients,
    register, send_message,
};
use tracing::info;

use crate::cli::Commands;

/// Runs one command, writing its output to `out`.
pub async fn execute<T: Transport>(
    api: &MailApi<T>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Register { name, password } => {
            let session = register(api, &name, &password).await?;
            writeln!(out, "Registered {} with user id {}", session.name, session.id)?;
        }
        Commands::Login { name, password } => {
            let (session, inbox) = login_and_fetch_inbox(api, &name, &password).await?;
            writeln!(out, "Logged in as {} (user id {})", session.name, session.id)?;
            print_inbox(out, &inbox)?;
        }
        Commands::Inbox { user_id } => {
            let user_id = parse_user_id(user_id)?;
            let messages = list_messages(api, &user_id).await?;
            print_inbox(out, &Inbox::with_messages(user_id, messages))?;
        }
        Commands::Send {
            from,
            to,
            subject,
            body,
        } => {
            let message = OutgoingMessage::new(parse_user_id(from)?, subject, body)
                .to_all(parse_recipients(&to));
            match send_message(api, &message).await {
                Ok(report) => {
                    print_report(out, &report)?;
                    writeln!(out, "Message sent.")?;
                }
                Err(SendError::PartialDelivery(report)) => {
                    print_report(out, &report)?;
                    return Err(SendError::PartialDelivery(report).into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Show { message_id } => {
            let detail = fetch_detail(api, &message_id).await?;
            writeln!(out, "Subject: {}", detail.subject)?;
            writeln!(out, "From:    {}", detail.sender)?;
            writeln!(out, "Sent:    {}", detail.sent)?;
            writeln!(out)?;
            writeln!(out, "{}", detail.body)?;
        }
        Commands::Delete {
            user_id,
            message_id,
        } => {
            let user_id = parse_user_id(user_id)?;
            delete_message(api, &user_id, &message_id).await?;
            writeln!(out, "Deleted message {message_id} for {user_id}")?;
        }
    }

    Ok(())
}

fn parse_user_id(raw: String) -> Result<SessionId> {
    SessionId::parse(raw).context("user id must not be empty")
}

fn print_inbox(out: &mut impl Write, inbox: &Inbox) -> Result<()> {
    if inbox.is_empty() {
        writeln!(out, "No messages.")?;
        return Ok(());
    }

    info!(user_id = %inbox.owner(), count = inbox.len(), "Showing inbox");
    for message in inbox {
        let Message {
            message_id,
            sender_name,
            subject,
            ..
        } = message;
        writeln!(out, "{:<12} {sender_name:<16} {subject}", message_id.as_str())?;
    }
    Ok(())
}

fn print_report(out: &mut impl Write, report: &SendReport) -> Result<()> {
    writeln!(out, "Created message {}", report.message_id)?;
    for delivery in &report.deliveries {
        let (mark, detail) = match &delivery.outcome {
            DeliveryOutcome::Delivered(status) => ("ok", status),
            DeliveryOutcome::Refused(status) => ("refused", status),
            DeliveryOutcome::Failed(reason) => ("failed", reason),
        };
        writeln!(out, "  {:<8} {}: {detail}", mark, delivery.recipient)?;
    }
    Ok(())
}
