//! # Command Events
//!
//! Work a command hands back to the controller because it cannot finish
//! synchronously inside the dispatch.

use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// GET an already validated URL and print the JSON body
    FetchRequested { url: Url },

    /// Leave the application
    QuitRequested,
}
