//! The authoring session: draft, fetched candidates, projected grid.

use crate::service::{QuizdleService, ServiceError};
use crate::store::{SessionState, SessionStore};
use chrono::NaiveDate;
use quizdle_core::{
    assemble_document, CandidateSet, Conflict, Grid, PlacementError, PuzzleDraft, PuzzleError,
};
use std::fmt;
use std::sync::Arc;

/// The current candidate projected onto a grid, plus any layout conflicts.
#[derive(Debug, Clone)]
pub struct ProjectedGrid {
    pub grid: Grid,
    pub conflicts: Vec<Conflict>,
}

/// Why a builder operation could not complete.
#[derive(Debug, Clone)]
pub enum BuilderError {
    /// Not all five answers are filled in; holds the blank indices.
    Incomplete(Vec<usize>),
    /// The service could not be reached or failed.
    Service(ServiceError),
    /// The service answered with layout errors instead of grids.
    Layout(String),
    /// The service handed back a malformed candidate.
    Malformed(PlacementError),
    /// No candidate layout to work with.
    NoLayout,
    /// No publish date selected.
    NoDate,
    /// The draft could not be assembled into a document.
    Puzzle(PuzzleError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete(missing) => {
                write!(f, "You must provide all the answers! (missing: ")?;
                for (i, index) in missing.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", index + 1)?;
                }
                write!(f, ")")
            }
            Self::Service(e) => write!(f, "{}", e),
            Self::Layout(e) => write!(f, "{}", e),
            Self::Malformed(e) => write!(f, "Bad layout from service: {}", e),
            Self::NoLayout => write!(f, "No grid has been generated yet"),
            Self::NoDate => write!(f, "Pick a publish date first"),
            Self::Puzzle(e) => write!(f, "{}", e),
        }
    }
}

/// One authoring session. Owns the draft and the fetched candidates, keeps
/// them persisted through the session store, and talks to the service.
pub struct Builder {
    store: SessionStore,
    service: Arc<dyn QuizdleService>,
    draft: PuzzleDraft,
    candidates: CandidateSet,
    current: Option<ProjectedGrid>,
    selected_date: Option<NaiveDate>,
}

impl Builder {
    /// Resume whatever session the store holds.
    pub fn new(store: SessionStore, service: Arc<dyn QuizdleService>) -> Self {
        let state = store.load();
        let mut builder = Self {
            store,
            service,
            draft: state.draft,
            candidates: state.candidates,
            current: None,
            selected_date: None,
        };
        // A stale session with a bad candidate just starts without a grid.
        let _ = builder.reproject();
        builder
    }

    pub fn draft(&self) -> &PuzzleDraft {
        &self.draft
    }

    pub fn set_answer(&mut self, index: usize, text: &str) {
        self.draft.set_answer(index, text);
    }

    pub fn set_question(&mut self, index: usize, text: &str) {
        self.draft.set_question(index, text);
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.persist();
    }

    pub fn current_grid(&self) -> Option<&ProjectedGrid> {
        self.current.as_ref()
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// (one-based index, total) for the "i of n" display.
    pub fn candidate_position(&self) -> Option<(usize, usize)> {
        if self.candidates.is_empty() {
            None
        } else {
            Some((self.candidates.index() + 1, self.candidates.len()))
        }
    }

    pub fn is_first_candidate(&self) -> bool {
        self.candidates.is_first()
    }

    pub fn is_last_candidate(&self) -> bool {
        self.candidates.is_last()
    }

    /// Request layouts for the current answers, replacing any previous
    /// candidates. Returns the number of candidates received.
    pub fn generate(&mut self) -> Result<usize, BuilderError> {
        let missing = self.draft.missing_answers();
        if !missing.is_empty() {
            return Err(BuilderError::Incomplete(missing));
        }

        log::info!("requesting grids for {} words", self.draft.words().len());
        let response = self
            .service
            .generate(&self.draft.words())
            .map_err(BuilderError::Service)?;

        if let Some(error) = response.error_message() {
            return Err(BuilderError::Layout(error));
        }
        if response.grids.is_empty() {
            return Err(BuilderError::Layout("Service returned no grids".to_string()));
        }
        for warning in &response.warnings {
            log::warn!("layout warning: {}", warning);
        }

        let count = response.grids.len();
        self.candidates = CandidateSet::new(response.grids);
        self.persist();
        self.reproject()?;
        Ok(count)
    }

    /// Page to the next candidate. Returns false at the last one.
    pub fn next_candidate(&mut self) -> Result<bool, BuilderError> {
        if !self.candidates.next() {
            return Ok(false);
        }
        self.persist();
        self.reproject()?;
        Ok(true)
    }

    /// Page to the previous candidate. Returns false at the first one.
    pub fn prev_candidate(&mut self) -> Result<bool, BuilderError> {
        if !self.candidates.prev() {
            return Ok(false);
        }
        self.persist();
        self.reproject()?;
        Ok(true)
    }

    /// Tear down and rebuild the projected grid from the current candidate.
    fn reproject(&mut self) -> Result<(), BuilderError> {
        self.current = None;
        if let Some(candidate) = self.candidates.current() {
            let (grid, conflicts) = candidate.realize().map_err(BuilderError::Malformed)?;
            self.current = Some(ProjectedGrid { grid, conflicts });
        }
        Ok(())
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Ask the service which of the week's days are already published.
    pub fn week_status(&self, start: NaiveDate) -> Result<Vec<NaiveDate>, BuilderError> {
        self.service.week_status(start).map_err(BuilderError::Service)
    }

    /// Assemble the document for the current candidate and upload it.
    pub fn publish(&mut self, password: &str) -> Result<(), BuilderError> {
        let candidate = self.candidates.current().ok_or(BuilderError::NoLayout)?;
        let date = self.selected_date.ok_or(BuilderError::NoDate)?;

        let document = assemble_document(
            &self.draft,
            &date.format("%Y-%m-%d").to_string(),
            &candidate.clues,
        )
        .map_err(BuilderError::Puzzle)?;

        self.service
            .publish(&document, password)
            .map_err(BuilderError::Service)?;
        log::info!("published quizdle for {}", date);
        Ok(())
    }

    /// Write the session file.
    pub fn persist(&self) {
        self.store.save(&SessionState {
            draft: self.draft.clone(),
            candidates: self.candidates.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockService;
    use quizdle_core::{Direction, GridCandidate, LayoutResponse, Placement, Position};
    use std::path::PathBuf;

    fn temp_store(name: &str) -> SessionStore {
        let path: PathBuf =
            std::env::temp_dir().join(format!("quizdle_builder_test_{}.json", name));
        let _ = std::fs::remove_file(&path);
        SessionStore::at(path)
    }

    fn mock_with_grids(grids: Vec<GridCandidate>) -> Arc<MockService> {
        let service = Arc::new(MockService::new());
        service.set_response(LayoutResponse {
            grids,
            errors: vec![],
            warnings: vec![],
        });
        service
    }

    fn candidate(word: &str) -> GridCandidate {
        GridCandidate {
            grid_size: 6,
            clues: vec![Placement::new(word, 0, 0, Direction::Across)],
        }
    }

    fn filled_builder(name: &str, service: Arc<MockService>) -> Builder {
        let mut builder = Builder::new(temp_store(name), service);
        for (i, answer) in ["CAT", "DOG", "BIRD", "FISH", "NEWT"].iter().enumerate() {
            builder.set_answer(i, answer);
            builder.set_question(i, "q");
        }
        builder
    }

    #[test]
    fn test_generate_requires_all_answers() {
        let service = mock_with_grids(vec![candidate("CAT")]);
        let mut builder = Builder::new(temp_store("incomplete"), service.clone());
        builder.set_answer(0, "CAT");
        builder.set_answer(2, "BIRD");

        match builder.generate() {
            Err(BuilderError::Incomplete(missing)) => assert_eq!(missing, vec![1, 3, 4]),
            other => panic!("expected Incomplete, got {:?}", other.map(|_| ())),
        }
        // The service was never called.
        assert_eq!(service.generate_calls(), 0);
    }

    #[test]
    fn test_generate_populates_candidates_and_grid() {
        let service = mock_with_grids(vec![candidate("CAT"), candidate("DOG")]);
        let mut builder = filled_builder("populate", service);

        let count = builder.generate().unwrap();
        assert_eq!(count, 2);
        assert_eq!(builder.candidate_position(), Some((1, 2)));

        let projected = builder.current_grid().unwrap();
        assert_eq!(projected.grid.get(Position::new(0, 0)), Some('C'));
        assert!(projected.conflicts.is_empty());
    }

    #[test]
    fn test_generate_surfaces_service_errors() {
        let service = Arc::new(MockService::new());
        service.set_response(LayoutResponse {
            grids: vec![],
            errors: vec!["too few words".to_string(), "bad word".to_string()],
            warnings: vec![],
        });
        let mut builder = filled_builder("errors", service);

        match builder.generate() {
            Err(BuilderError::Layout(msg)) => assert_eq!(msg, "too few words, bad word"),
            other => panic!("expected Layout error, got {:?}", other.map(|_| ())),
        }
        assert!(!builder.has_candidates());
    }

    #[test]
    fn test_paging_moves_and_saturates() {
        let service = mock_with_grids(vec![candidate("CAT"), candidate("DOG")]);
        let mut builder = filled_builder("paging", service);
        builder.generate().unwrap();

        assert!(builder.next_candidate().unwrap());
        assert_eq!(builder.candidate_position(), Some((2, 2)));
        assert_eq!(
            builder.current_grid().unwrap().grid.get(Position::new(0, 0)),
            Some('D')
        );

        // Saturates at the last candidate.
        assert!(!builder.next_candidate().unwrap());
        assert_eq!(builder.candidate_position(), Some((2, 2)));

        assert!(builder.prev_candidate().unwrap());
        assert!(!builder.prev_candidate().unwrap());
        assert_eq!(builder.candidate_position(), Some((1, 2)));
    }

    #[test]
    fn test_session_resumes_candidates_and_index() {
        let service = mock_with_grids(vec![candidate("CAT"), candidate("DOG")]);
        {
            let mut builder = filled_builder("resume", service.clone());
            builder.generate().unwrap();
            builder.next_candidate().unwrap();
        }

        // A fresh builder over the same store picks up where we left off,
        // without asking the service again.
        let resumed = Builder::new(temp_store_keep("resume"), service.clone());
        assert_eq!(resumed.candidate_position(), Some((2, 2)));
        assert_eq!(
            resumed.current_grid().unwrap().grid.get(Position::new(0, 0)),
            Some('D')
        );
        assert_eq!(service.generate_calls(), 1);
    }

    fn temp_store_keep(name: &str) -> SessionStore {
        SessionStore::at(std::env::temp_dir().join(format!("quizdle_builder_test_{}.json", name)))
    }

    #[test]
    fn test_publish_needs_layout_and_date() {
        let service = mock_with_grids(vec![candidate("CAT")]);
        let mut builder = filled_builder("publish_guards", service);

        assert!(matches!(builder.publish("pwd"), Err(BuilderError::NoLayout)));

        builder.generate().unwrap();
        assert!(matches!(builder.publish("pwd"), Err(BuilderError::NoDate)));
    }

    #[test]
    fn test_publish_uploads_document() {
        // A candidate containing every answer, so binding succeeds.
        let clues: Vec<Placement> = ["CAT", "DOG", "BIRD", "FISH", "NEWT"]
            .iter()
            .enumerate()
            .map(|(i, word)| Placement::new(*word, i, 0, Direction::Across))
            .collect();
        let service = mock_with_grids(vec![GridCandidate {
            grid_size: 6,
            clues,
        }]);
        service.set_password("hunter2");

        let mut builder = filled_builder("publish", service.clone());
        builder.generate().unwrap();
        builder.select_date(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());

        assert!(matches!(
            builder.publish("wrong"),
            Err(BuilderError::Service(ServiceError::AuthenticationFailed))
        ));

        builder.publish("hunter2").unwrap();
        let document = service.last_published().unwrap();
        assert_eq!(document.date(), Some("2025-11-03"));
        assert_eq!(document.get("answer1"), Some("CAT"));
        assert_eq!(document.get("rowCol2"), Some("1,0,A"));
    }
}
