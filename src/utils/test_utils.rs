#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::config::Config;
#[cfg(test)]
use crate::core::message::Message;

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new("http://qa.test".to_string(), &Config::default())
}

#[cfg(test)]
pub fn create_test_messages() -> Vec<Message> {
    vec![
        Message::user("What programs do you offer?"),
        Message::bot("We offer **undergraduate** and *graduate* programs.\nSee https://example.edu/programs"),
        Message::user("Thanks"),
        Message::bot_error("Network error. Please check your connection."),
    ]
}
