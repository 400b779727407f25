//! Chat widget markup.

use super::html::escape;
use crate::chat::{ChatMessage, MessageKind};

/// How often the log re-polls while an answer is pending.
const POLL_INTERVAL: &str = "1s";

fn bubble(message: &ChatMessage) -> String {
    let (align, tone) = match message.kind {
        MessageKind::User => ("self-end", "chat-bubble-user"),
        MessageKind::Ai => ("self-start", "chat-bubble-ai"),
        MessageKind::Pending => ("self-start", "chat-bubble-pending"),
        MessageKind::Error => ("self-start", "chat-bubble-error"),
    };
    let body = if message.kind == MessageKind::Pending {
        r#"<span class="typing-dots" aria-label="typing"><span></span><span></span><span></span></span>"#
            .to_string()
    } else {
        escape(&message.text)
    };
    format!(
        r#"<div class="chat-bubble {align} {tone}" data-message-id="{id}" style="white-space: pre-wrap">{body}</div>"#,
        id = message.id,
    )
}

/// The message list; polls itself while a placeholder is outstanding.
#[must_use]
pub fn chat_log(messages: &[ChatMessage]) -> String {
    let waiting = messages.iter().any(|m| m.kind == MessageKind::Pending);
    let poll = if waiting {
        format!(
            r#" hx-get="/chat/messages" hx-trigger="every {POLL_INTERVAL}" hx-swap="outerHTML""#
        )
    } else {
        String::new()
    };
    let bubbles: String = messages.iter().map(bubble).collect();
    format!(
        r#"<div id="chat-log" class="flex-1 overflow-y-auto mb-4 flex flex-col gap-2" aria-live="polite"{poll}>{bubbles}</div>"#
    )
}

/// The full widget: message list plus input form.
#[must_use]
pub fn chat_widget(messages: &[ChatMessage]) -> String {
    format!(
        r##"<div class="chat-widget flex flex-col max-h-[60vh] mx-auto p-6 rounded-2xl shadow-xl w-full max-w-2xl">
    {log}
    <form class="flex flex-row gap-2 mt-2 items-end"
          hx-post="/chat" hx-target="#chat-log" hx-swap="outerHTML"
          hx-on::after-request="this.reset()">
        <textarea name="message" rows="1" required
                  placeholder="Ask a question here..."
                  class="flex-1 w-full p-3 rounded-2xl resize-none"></textarea>
        <button type="submit" class="shrink-0 px-5 py-3 rounded-2xl font-semibold">Send</button>
    </form>
</div>"##,
        log = chat_log(messages)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatLog;

    #[test]
    fn test_pending_log_polls() {
        let mut log = ChatLog::with_greeting("Hi");
        assert!(!chat_log(log.messages()).contains("hx-trigger"));

        log.submit("<b>question</b>").unwrap();
        let html = chat_log(log.messages());
        assert!(html.contains(r#"hx-trigger="every 1s""#));
        assert!(html.contains("typing-dots"));
        assert!(html.contains("&lt;b&gt;question&lt;/b&gt;"));
    }
}
