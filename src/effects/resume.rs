//! Resume button: download the static resume file through a throwaway link.

use crate::dom::NodeData;
use crate::event::handler::Handler;
use crate::event::message::Envelope;
use crate::page::PageState;

pub const RESUME_BUTTON: &str = "downloadResume";

/// Creates an `a[download]`, follows it, and removes it again.
#[derive(Debug, Clone)]
pub struct ResumeDownload {
    file: String,
}

impl ResumeDownload {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

impl Handler for ResumeDownload {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        let Some(body) = state.dom.body() else { return };
        let link = NodeData::new("a")
            .with_attr("href", self.file.as_str())
            .with_attr("download", self.file.as_str());
        let Some(link) = state.append(body, link) else { return };
        state.follow_link(link);
        state.dom.remove(link);
    }
}
