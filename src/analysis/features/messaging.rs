//! Message broker producers, sends and listeners.

use crate::ast::ClassDecl;
use crate::types::MessagingUsage;

const TEMPLATES: &[&str] = &["KafkaTemplate", "AmqpTemplate", "RabbitTemplate"];
const SEND_CALLS: &[&str] = &["send", "convertAndSend"];
const LISTENERS: &[&str] = &["KafkaListener", "RabbitListener", "JmsListener"];

#[must_use]
pub fn messaging_usage(class: &ClassDecl) -> Vec<MessagingUsage> {
    let mut usage = Vec::new();

    for field in &class.fields {
        if let Some(ty) = field.type_name().filter(|t| TEMPLATES.contains(t)) {
            usage.push(MessagingUsage {
                usage: "Producer".into(),
                template_type: Some(ty.to_string()),
                method: None,
                call: None,
            });
        }
    }

    for method in &class.methods {
        if method.annotations.iter().any(|a| a.is_any(LISTENERS)) {
            usage.push(MessagingUsage {
                usage: "Consumer".into(),
                template_type: None,
                method: Some(method.name.clone()),
                call: None,
            });
        }
        for inv in method.body_nodes().filter_map(|n| n.as_invocation()) {
            if SEND_CALLS.contains(&inv.member.as_str()) {
                usage.push(MessagingUsage {
                    usage: "Messaging Send".into(),
                    template_type: None,
                    method: Some(method.name.clone()),
                    call: Some(inv.member.clone()),
                });
            }
        }
    }
    usage
}
