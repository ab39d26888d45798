//! Presentation-format dump of a whole message, in the layout `dig` uses.

use super::response_parser::ResponseParser;
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::Record;
use std::fmt::Write;

pub fn render_message(message: &Message) -> String {
    let mut out = String::with_capacity(256);

    let _ = writeln!(
        out,
        ";; opcode: {}, status: {}, id: {}",
        op_code_text(message.op_code()),
        ResponseParser::status(message),
        message.id()
    );
    let _ = writeln!(
        out,
        ";; flags:{}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
        flags_text(message),
        message.queries().len(),
        message.answers().len(),
        message.name_servers().len(),
        message.additionals().len()
    );

    if !message.queries().is_empty() {
        out.push_str("\n;; QUESTION SECTION:\n");
        for query in message.queries() {
            let _ = writeln!(
                out,
                ";{}\t{}\t{}",
                query.name(),
                query.query_class(),
                query.query_type()
            );
        }
    }

    render_section(&mut out, "ANSWER", message.answers());
    render_section(&mut out, "AUTHORITY", message.name_servers());
    render_section(&mut out, "ADDITIONAL", message.additionals());

    out
}

fn render_section(out: &mut String, title: &str, records: &[Record]) {
    if records.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n;; {} SECTION:", title);
    for record in records {
        let _ = writeln!(out, "{}", record);
    }
}

fn flags_text(message: &Message) -> String {
    let mut flags = String::new();
    if message.message_type() == MessageType::Response {
        flags.push_str(" qr");
    }
    if message.authoritative() {
        flags.push_str(" aa");
    }
    if message.truncated() {
        flags.push_str(" tc");
    }
    if message.recursion_desired() {
        flags.push_str(" rd");
    }
    if message.recursion_available() {
        flags.push_str(" ra");
    }
    if message.authentic_data() {
        flags.push_str(" ad");
    }
    if message.checking_disabled() {
        flags.push_str(" cd");
    }
    flags
}

fn op_code_text(op_code: OpCode) -> &'static str {
    match op_code {
        OpCode::Query => "QUERY",
        OpCode::Status => "STATUS",
        OpCode::Notify => "NOTIFY",
        OpCode::Update => "UPDATE",
        _ => "UNKNOWN",
    }
}
