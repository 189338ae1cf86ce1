#[cfg(unix)]
use std::fs;

#[cfg(unix)]
use mailopen_lib::{Email, Sender, Sendmail, SendmailConfig};

#[cfg(unix)]
#[test]
fn test_sendmail_sender() {
    env_logger::builder().is_test(true).try_init().ok();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sent.eml");

    let mut sendmail = Sendmail::new(SendmailConfig {
        cmd: format!("cat > {}", out.display()),
    });

    // checking that an email can be built and sent
    let email = Email::default()
        .from("alice@localhost")
        .to("bob@localhost")
        .subject("Plain message!")
        .html_body("<p>Plain message!</p>")
        .text_plain_body("Plain message!");
    sendmail.send(&email).unwrap();

    // checking that the sent email can be parsed back
    let sent = Email::from_raw(&fs::read(&out).unwrap()).unwrap();
    assert_eq!("alice@localhost", sent.from);
    assert_eq!(vec!["bob@localhost"], sent.to);
    assert_eq!("Plain message!", sent.subject);
    assert_eq!(2, sent.bodies.len());
}

#[cfg(unix)]
#[test]
fn test_sendmail_sender_failing_cmd() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut sendmail = Sendmail::new(SendmailConfig {
        cmd: String::from("cat > /dev/null; exit 1"),
    });

    let email = Email::default()
        .from("alice@localhost")
        .to("bob@localhost")
        .html_body("<p>Hi</p>")
        .text_plain_body("Hi");

    assert!(matches!(
        sendmail.send(&email),
        Err(mailopen_lib::Error::SendmailError(_))
    ));
}
