//! # Career Mentor Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives `career-mentor chat` through stdin and checks the replies printed
//! to stdout.
//!

mod common;
use common::*;
use predicates::prelude::*;

const FALLBACK: &str = "Mentor: ❓ I don’t have a predefined roadmap for that career yet.\n\nBut I can still help! Please tell me more about the field or interest you have.\n\nYou can also try asking about:\n- Web Developer\n- Data Scientist\n- AI Engineer\n- SEO Expert\n- Graphic Designer\n";

#[test]
fn test_chat_web_developer_roadmap() {
    let dir = sandbox();
    mentor_cmd(dir.path())
        .arg("chat")
        .write_stdin("I want to become a Web Developer\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mentor: 👩‍💼 Hello! I'm your Career Mentor.").and(
                predicate::str::contains(
                    "Mentor: 🛠️ Skill roadmap for **Web Developer**:\n1. HTML/CSS\n2. JavaScript\n3. React or Vue\n4. Backend (Node.js/Django)\n5. Deploy projects\n",
                ),
            ),
        );
}

#[test]
fn test_chat_fallback() {
    let dir = sandbox();
    mentor_cmd(dir.path())
        .arg("chat")
        .write_stdin("underwater basket weaving\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(FALLBACK));
}

#[test]
fn test_chat_history_and_custom_name() {
    let dir = sandbox();
    mentor_cmd(dir.path())
        .args(["chat", "--name", "Coach"])
        .write_stdin("DATA SCIENTIST\nseo and web developer\n/history\n/exit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Coach: 🛠️ Skill roadmap for **Data Scientist**:")
                .and(predicate::str::contains("Coach: 🛠️ Skill roadmap for **Web Developer**:"))
                .and(predicate::str::contains("[user] DATA SCIENTIST\n"))
                .and(predicate::str::contains("[user] seo and web developer\n"))
                .and(predicate::str::contains("Coach: Goodbye!")),
        );
}

#[test]
fn test_chat_empty_input_ends_cleanly() {
    let dir = sandbox();
    mentor_cmd(dir.path())
        .arg("chat")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mentor: Goodbye!"));
}
