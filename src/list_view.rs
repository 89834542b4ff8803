// List View - rows over the repository
//
// The view never holds a reference to the repository. It subscribes once,
// the callback only flips a shared `stale` flag, and `refresh` re-reads the
// whole collection when the flag is set. Selection follows the animal's id
// across mutations, so deleting a row above the cursor does not move it.

use crate::animal::{Animal, Identifiable, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_NAME};
use crate::detail_view::DetailView;
use crate::error::RepositoryError;
use crate::repository::{AnimalRepository, SubscriptionId};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

pub const LIST_TITLE: &str = "Animals";

/// Snapshot of one animal as the list shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumb_name: String,
}

impl From<&Animal> for AnimalRow {
    fn from(animal: &Animal) -> Self {
        AnimalRow {
            id: animal.id().to_string(),
            name: animal.name.clone(),
            description: animal.description.clone(),
            thumb_name: animal.thumb_name(),
        }
    }
}

pub struct ListView {
    rows: Vec<AnimalRow>,
    selected: Option<usize>,
    stale: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl ListView {
    /// Subscribe to `repo` and take the first snapshot
    pub fn attach(repo: &mut AnimalRepository) -> Self {
        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        let subscription = repo.subscribe(move || flag.set(true));

        let mut view = ListView {
            rows: Vec::new(),
            selected: None,
            stale,
            subscription,
        };
        view.refresh(repo);
        view
    }

    /// Drop the repository subscription
    pub fn detach(self, repo: &mut AnimalRepository) {
        repo.unsubscribe(self.subscription);
    }

    pub fn rows(&self) -> &[AnimalRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Re-read the collection if a notification arrived since the last read.
    /// Returns true when the rows were rebuilt.
    pub fn refresh(&mut self, repo: &AnimalRepository) -> bool {
        if !self.stale.replace(false) {
            return false;
        }

        let previous_id = self
            .selected
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id.clone());

        self.rows = repo.items().iter().map(AnimalRow::from).collect();

        self.selected = if self.rows.is_empty() {
            None
        } else {
            let kept = previous_id
                .and_then(|id| self.rows.iter().position(|row| row.id == id));
            match (kept, self.selected) {
                (Some(i), _) => Some(i),
                (None, Some(i)) => Some(i.min(self.rows.len() - 1)),
                (None, None) => Some(0),
            }
        };

        debug!(rows = self.rows.len(), selected = ?self.selected, "list refreshed");
        true
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// The "+" action: append the placeholder animal
    pub fn add(&mut self, repo: &mut AnimalRepository) {
        repo.append(Animal::new(PLACEHOLDER_NAME, PLACEHOLDER_DESCRIPTION));
        self.refresh(repo);
    }

    /// Delete rows at `offsets` (one repository mutation)
    ///
    /// Offsets are positions in the rows this view shows. They are mapped to
    /// the repository through each row's id, so a change made elsewhere since
    /// the last refresh cannot redirect the delete to another animal. Rows
    /// whose animal is already gone are skipped.
    pub fn delete(
        &mut self,
        repo: &mut AnimalRepository,
        offsets: &[usize],
    ) -> Result<Vec<Animal>, RepositoryError> {
        let len = self.rows.len();
        if let Some(&index) = offsets.iter().find(|&&i| i >= len) {
            return Err(RepositoryError::IndexOutOfRange { index, len });
        }

        let positions: Vec<usize> = offsets
            .iter()
            .filter_map(|&i| repo.position_of(&self.rows[i].id))
            .collect();

        let removed = repo.remove_offsets(&positions)?;
        self.refresh(repo);
        Ok(removed)
    }

    /// Delete the selected row, if any
    pub fn delete_selected(
        &mut self,
        repo: &mut AnimalRepository,
    ) -> Result<Option<Animal>, RepositoryError> {
        let Some(index) = self.selected else {
            return Ok(None);
        };
        let mut removed = self.delete(repo, &[index])?;
        Ok(removed.pop())
    }

    /// Navigate to the selected animal. The detail view gets its own copy.
    pub fn open_selected(&self, repo: &AnimalRepository) -> Option<DetailView> {
        self.selected_animal(repo)
            .map(|animal| DetailView::new(animal.clone()))
    }

    pub fn selected_animal<'a>(&self, repo: &'a AnimalRepository) -> Option<&'a Animal> {
        let row = self.selected.and_then(|i| self.rows.get(i))?;
        repo.position_of(&row.id).and_then(|i| repo.get(i))
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn select_next(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = Some(self.rows.len() - 1);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
