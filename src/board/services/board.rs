//! Mutation orchestrator keeping the canonical collection in step with the
//! remote store.
//!
//! Every mutating operation follows the same protocol: validate locally,
//! issue at most one remote request, apply the matching [`TaskStore`]
//! primitive only once the remote store confirms, then re-derive and publish
//! the [`BoardView`]. A failed request leaves the canonical collection as it
//! was. Nothing is retried.

use super::{BoardIntent, BoardView, Outcome, SkipReason, TaskStore, TaskStoreError};
use crate::board::{
    domain::{
        Direction, Lanes, NewTask, SortMode, Task, TaskId, TaskPatch, TaskStatus, TaskText,
        derive_lanes,
    },
    ports::{TaskRemote, TaskRemoteError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The remote store rejected or failed the request.
    #[error(transparent)]
    Remote(#[from] TaskRemoteError),
    /// The canonical collection rejected the confirmed change.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// The task is not in the canonical collection.
    #[error("task not on the board: {0}")]
    UnknownTask(TaskId),
    /// The board state lock was poisoned.
    #[error("board state unavailable: {0}")]
    StateUnavailable(String),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Default)]
struct BoardState {
    store: TaskStore,
    sort_mode: SortMode,
    drafts: HashMap<TaskId, String>,
    new_task_text: String,
    in_flight: usize,
    error: bool,
}

impl BoardState {
    fn view(&self) -> BoardView {
        let lanes = if self.error {
            Lanes::default()
        } else {
            derive_lanes(self.store.tasks(), self.sort_mode)
        };
        BoardView {
            loading: self.in_flight > 0,
            error: self.error,
            lanes,
            sort_mode: self.sort_mode,
            sort_label: self.sort_mode.label(),
            editing: self.drafts.clone(),
            new_task_text: self.new_task_text.clone(),
        }
    }

    fn known_task(&self, id: &TaskId) -> BoardResult<Task> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| BoardError::UnknownTask(id.clone()))
    }

    fn apply_patch(&mut self, id: &TaskId, patch: &TaskPatch) -> BoardResult<Outcome> {
        let task = self
            .store
            .update_fields(id, patch)
            .ok_or_else(|| BoardError::UnknownTask(id.clone()))?;
        debug!(task_id = %id, status = %task.status(), "applied confirmed patch");
        Ok(Outcome::Applied)
    }
}

/// Board orchestration service.
///
/// Methods take `&self`, so several intents may be in flight at once.
/// Confirmations are applied in arrival order; the last one wins. The state
/// lock is never held across a remote call.
pub struct BoardService<R, C>
where
    R: TaskRemote,
    C: Clock + Send + Sync,
{
    remote: Arc<R>,
    clock: Arc<C>,
    state: Mutex<BoardState>,
    view: watch::Sender<BoardView>,
}

impl<R, C> BoardService<R, C>
where
    R: TaskRemote,
    C: Clock + Send + Sync,
{
    /// Creates a board with an empty canonical collection.
    #[must_use]
    pub fn new(remote: Arc<R>, clock: Arc<C>) -> Self {
        let state = BoardState::default();
        let (view, _) = watch::channel(state.view());
        Self {
            remote,
            clock,
            state: Mutex::new(state),
            view,
        }
    }

    /// Sets the initial sort mode.
    #[must_use]
    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.sort_mode = sort_mode;
            self.view.send_replace(state.view());
        }
        self
    }

    /// Subscribes to view updates. A new view is published after every
    /// state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.view.subscribe()
    }

    /// Returns the latest published view.
    #[must_use]
    pub fn view(&self) -> BoardView {
        self.view.borrow().clone()
    }

    /// Returns the canonical collection in fetch and insert order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn tasks(&self) -> BoardResult<Vec<Task>> {
        Ok(self.lock()?.store.tasks().to_vec())
    }

    /// Replaces the canonical collection with the remote one.
    ///
    /// Clears the error flag first. On failure the flag is set and the
    /// published lanes are blank until a later fetch succeeds; the canonical
    /// collection itself is kept. Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the fetch fails and
    /// [`BoardError::Store`] when the response repeats an identifier.
    pub async fn refresh(&self) -> BoardResult<usize> {
        self.update(|state| {
            state.error = false;
            state.in_flight += 1;
            Ok(())
        })?;
        let fetched = self.remote.fetch_all().await;
        self.settle(|state| {
            let loaded = fetched.map_err(BoardError::from).and_then(|tasks| {
                let count = tasks.len();
                state.store.replace_all(tasks)?;
                Ok(count)
            });
            match loaded {
                Ok(count) => {
                    let BoardState { store, drafts, .. } = state;
                    drafts.retain(|id, _| store.contains(id));
                    info!(count, "loaded task collection");
                    Ok(count)
                }
                Err(err) => {
                    state.error = true;
                    warn!(error = %err, "task fetch failed");
                    Err(err)
                }
            }
        })
    }

    /// Creates a task from `text`.
    ///
    /// Text that is empty after trimming is ignored without a request. The
    /// new-task input is cleared only once the server confirms. When a
    /// refetch already loaded the confirmed task, the server copy replaces
    /// it in place.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the request fails, leaving the
    /// collection and input unchanged.
    pub async fn create(&self, text: &str) -> BoardResult<Outcome> {
        let Ok(task_text) = TaskText::new(text) else {
            debug!("ignoring create with empty text");
            return Ok(Outcome::Skipped(SkipReason::EmptyText));
        };
        let new_task = NewTask::new(task_text, self.clock.utc());
        self.begin()?;
        let created = self.remote.create(&new_task).await;
        self.settle(|state| match created {
            Ok(task) => {
                let task_id = task.id().clone();
                if state.store.upsert(task) {
                    debug!(%task_id, "created task already loaded by a refetch");
                } else {
                    debug!(%task_id, "task created");
                }
                state.new_task_text.clear();
                Ok(Outcome::Applied)
            }
            Err(err) => {
                warn!(error = %err, "task creation failed");
                Err(err.into())
            }
        })
    }

    /// Replaces the contents of the new-task input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn set_new_task_text(&self, text: impl Into<String>) -> BoardResult<()> {
        self.update(|state| {
            state.new_task_text = text.into();
            Ok(())
        })
    }

    /// Creates a task from the new-task input.
    ///
    /// # Errors
    ///
    /// See [`Self::create`].
    pub async fn submit_new_task(&self) -> BoardResult<Outcome> {
        let text = self.new_task_text()?;
        self.create(&text).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] without a request when the task is
    /// not on the board, and [`BoardError::Remote`] when the deletion fails;
    /// the task then stays in its lane.
    pub async fn remove(&self, id: &TaskId) -> BoardResult<Outcome> {
        self.begin_for(id)?;
        let deleted = self.remote.delete(id).await;
        self.settle(|state| match deleted {
            Ok(()) => {
                state.store.remove(id);
                state.drafts.remove(id);
                debug!(task_id = %id, "task removed");
                Ok(Outcome::Applied)
            }
            Err(err) => {
                warn!(task_id = %id, error = %err, "task deletion failed");
                Err(err.into())
            }
        })
    }

    /// Enters edit mode with the current text as draft, or leaves it
    /// discarding the draft. Returns whether the task is now in edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub fn toggle_edit(&self, id: &TaskId) -> BoardResult<bool> {
        self.update(|state| {
            let task = state.known_task(id)?;
            if state.drafts.remove(id).is_some() {
                return Ok(false);
            }
            state
                .drafts
                .insert(id.clone(), task.text().as_str().to_owned());
            Ok(true)
        })
    }

    /// Replaces the unsaved text of a task in edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn update_edit_draft(&self, id: &TaskId, text: impl Into<String>) -> BoardResult<Outcome> {
        self.update(|state| match state.drafts.get_mut(id) {
            Some(draft) => {
                *draft = text.into();
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Skipped(SkipReason::NotEditing)),
        })
    }

    /// Commits edited text for a task.
    ///
    /// Text that is empty after trimming abandons the edit by refetching the
    /// whole collection instead of patching; the task leaves edit mode
    /// whatever the fetch outcome. Otherwise only the text is patched. On
    /// success the task leaves edit mode; on failure it stays in edit mode
    /// with `new_text` as its draft.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] without a request when the task is
    /// not on the board, and [`BoardError::Remote`] when the patch or the
    /// reverting fetch fails.
    pub async fn edit(&self, id: &TaskId, new_text: &str) -> BoardResult<Outcome> {
        self.known_task(id)?;
        let Ok(text) = TaskText::new(new_text) else {
            debug!(task_id = %id, "empty edit, reverting by refetch");
            let fetched = self.refresh().await;
            self.update(|state| {
                state.drafts.remove(id);
                Ok(())
            })?;
            return fetched.map(|_| Outcome::Reverted);
        };

        let patch = TaskPatch::text(text);
        self.begin_for(id)?;
        let patched = self.remote.patch(id, &patch).await;
        self.settle(|state| match patched {
            Ok(()) => {
                state.drafts.remove(id);
                state.apply_patch(id, &patch)
            }
            Err(err) => {
                state.drafts.insert(id.clone(), new_text.to_owned());
                warn!(task_id = %id, error = %err, "task edit failed");
                Err(err.into())
            }
        })
    }

    /// Moves a task one lane in `direction`.
    ///
    /// A move off either end of the board is skipped without a request.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board
    /// and [`BoardError::Remote`] when the patch fails.
    pub async fn move_task(&self, id: &TaskId, direction: Direction) -> BoardResult<Outcome> {
        let current = self.known_task(id)?.status();
        match current.next(direction) {
            Some(target) => self.send_status(id, target).await,
            None => {
                debug!(task_id = %id, status = %current, %direction, "illegal move ignored");
                Ok(Outcome::Skipped(SkipReason::IllegalTransition))
            }
        }
    }

    /// Moves a task to an explicit status.
    ///
    /// The current status and non-adjacent lanes are skipped without a
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board
    /// and [`BoardError::Remote`] when the patch fails.
    pub async fn transition(&self, id: &TaskId, target: TaskStatus) -> BoardResult<Outcome> {
        let current = self.known_task(id)?.status();
        if current == target {
            return Ok(Outcome::Skipped(SkipReason::Unchanged));
        }
        if !current.can_transition_to(target) {
            debug!(task_id = %id, from = %current, to = %target, "illegal transition ignored");
            return Ok(Outcome::Skipped(SkipReason::IllegalTransition));
        }
        self.send_status(id, target).await
    }

    /// Advances the sort mode and re-derives the lanes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StateUnavailable`] when the state lock is
    /// poisoned.
    pub fn toggle_sort(&self) -> BoardResult<SortMode> {
        self.update(|state| {
            state.sort_mode = state.sort_mode.cycle();
            Ok(state.sort_mode)
        })
    }

    /// Routes an intent from the rendering layer.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the intent maps to.
    pub async fn dispatch(&self, intent: BoardIntent) -> BoardResult<Outcome> {
        match intent {
            BoardIntent::CreateRequested(text) => self.create(&text).await,
            BoardIntent::DeleteRequested(id) => self.remove(&id).await,
            BoardIntent::EditToggled(id) => self.toggle_edit(&id).map(|_| Outcome::Applied),
            BoardIntent::EditCommitted(id, text) => self.edit(&id, &text).await,
            BoardIntent::MoveRequested(id, direction) => self.move_task(&id, direction).await,
            BoardIntent::SortToggled => self.toggle_sort().map(|_| Outcome::Applied),
        }
    }

    async fn send_status(&self, id: &TaskId, target: TaskStatus) -> BoardResult<Outcome> {
        let patch = TaskPatch::status(target);
        self.begin_for(id)?;
        let patched = self.remote.patch(id, &patch).await;
        self.settle(|state| match patched {
            Ok(()) => state.apply_patch(id, &patch),
            Err(err) => {
                warn!(task_id = %id, status = %target, error = %err, "task move failed");
                Err(err.into())
            }
        })
    }

    fn lock(&self) -> BoardResult<MutexGuard<'_, BoardState>> {
        self.state
            .lock()
            .map_err(|err| BoardError::StateUnavailable(err.to_string()))
    }

    fn known_task(&self, id: &TaskId) -> BoardResult<Task> {
        self.lock()?.known_task(id)
    }

    fn new_task_text(&self) -> BoardResult<String> {
        Ok(self.lock()?.new_task_text.clone())
    }

    /// Runs `apply` under the state lock and publishes the resulting view,
    /// whether or not `apply` succeeded.
    fn update<T>(&self, apply: impl FnOnce(&mut BoardState) -> BoardResult<T>) -> BoardResult<T> {
        let mut state = self.lock()?;
        let result = apply(&mut state);
        self.view.send_replace(state.view());
        result
    }

    fn begin(&self) -> BoardResult<()> {
        self.update(|state| {
            state.in_flight += 1;
            Ok(())
        })
    }

    fn begin_for(&self, id: &TaskId) -> BoardResult<()> {
        self.update(|state| {
            state.known_task(id)?;
            state.in_flight += 1;
            Ok(())
        })
    }

    /// Marks one request as finished, then applies its result.
    fn settle<T>(&self, apply: impl FnOnce(&mut BoardState) -> BoardResult<T>) -> BoardResult<T> {
        self.update(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            apply(state)
        })
    }
}
