// src/pipeline/notes.rs
use fonthunter_traits::FetchError;
use log::error;

/// Ordered success and error notes collected along one run.
///
/// Stages only ever append, so the final result reports every note seen on
/// the path the run took, whatever state it ended in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunNotes {
    pub successes: Vec<String>,
    pub errors: Vec<String>,
}

impl RunNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, note: impl Into<String>) {
        self.successes.push(note.into());
    }

    /// Records an error note and logs it.
    pub fn error(&mut self, note: impl Into<String>) {
        let note = note.into();
        error!("{}", note);
        self.errors.push(note);
    }

    /// Records the cause of a failed fetch when the request never produced a
    /// response. A plain non-2xx answer is left to the caller's own note.
    pub fn fetch_failure(&mut self, err: &FetchError) {
        match err {
            FetchError::Status { .. } => {}
            FetchError::Transport { url, message } | FetchError::Body { url, message } => {
                self.error(format!("Error fetching {}: {}", url, message));
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.successes, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_keep_their_cause() {
        let mut notes = RunNotes::new();
        notes.fetch_failure(&FetchError::Transport {
            url: "https://x.test/a.ttf".to_string(),
            message: "timed out".to_string(),
        });
        notes.fetch_failure(&FetchError::Status {
            url: "https://x.test/b.ttf".to_string(),
            status: 500,
        });
        assert_eq!(notes.errors, vec!["Error fetching https://x.test/a.ttf: timed out"]);
        assert!(notes.has_errors());
    }

    #[test]
    fn notes_keep_insertion_order() {
        let mut notes = RunNotes::new();
        notes.success("one");
        notes.error("bad");
        notes.success("two");
        let (successes, errors) = notes.into_parts();
        assert_eq!(successes, vec!["one", "two"]);
        assert_eq!(errors, vec!["bad"]);
    }
}
