//! Overlapping intents while a remote request is outstanding.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryTaskRemote,
    domain::{Direction, NewTask, SortMode, Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskRemote, TaskRemoteResult},
    services::{BoardService, Outcome},
};
use tokio::sync::Notify;

use super::helpers::{board_over, lane_ids, remote};

/// Holds every patch until `patch_gate` opens. Creates are stored first and
/// confirmed only once `create_gate` opens.
struct GatedRemote {
    inner: InMemoryTaskRemote,
    patch_gate: Notify,
    create_gate: Notify,
}

#[async_trait]
impl TaskRemote for GatedRemote {
    async fn fetch_all(&self) -> TaskRemoteResult<Vec<Task>> {
        self.inner.fetch_all().await
    }

    async fn create(&self, task: &NewTask) -> TaskRemoteResult<Task> {
        let created = self.inner.create(task).await;
        self.create_gate.notified().await;
        created
    }

    async fn delete(&self, id: &TaskId) -> TaskRemoteResult<()> {
        self.inner.delete(id).await
    }

    async fn patch(&self, id: &TaskId, patch: &TaskPatch) -> TaskRemoteResult<()> {
        self.patch_gate.notified().await;
        self.inner.patch(id, patch).await
    }
}

fn gated_board(
    remote: &InMemoryTaskRemote,
) -> (Arc<GatedRemote>, BoardService<GatedRemote, DefaultClock>) {
    let gated = Arc::new(GatedRemote {
        inner: remote.clone(),
        patch_gate: Notify::new(),
        create_gate: Notify::new(),
    });
    let board = BoardService::new(Arc::clone(&gated), Arc::new(DefaultClock));
    (gated, board)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sort_toggle_is_served_while_a_move_is_pending(
    remote: InMemoryTaskRemote,
) -> eyre::Result<()> {
    let (gated, board) = gated_board(&remote);
    board.refresh().await?;
    let mut updates = board.subscribe();
    let id = TaskId::from("1");

    let pending_move = board.move_task(&id, Direction::Forward);
    let meanwhile = async {
        updates
            .wait_for(|view| view.loading)
            .await
            .map_err(|err| eyre::eyre!("view channel closed: {err}"))?;
        let mode = board.toggle_sort()?;
        let view = board.view();
        ensure!(mode == SortMode::Ascending);
        ensure!(view.loading, "move should still be outstanding");
        ensure!(view.lanes.todo().len() == 1, "unconfirmed move must not apply");
        gated.patch_gate.notify_one();
        Ok::<_, eyre::Report>(())
    };

    let (moved, checked) = tokio::join!(pending_move, meanwhile);
    checked?;

    ensure!(moved? == Outcome::Applied);
    let view = board.view();
    ensure!(!view.loading);
    ensure!(view.sort_mode == SortMode::Ascending);
    ensure!(lane_ids(&board, TaskStatus::InProgress) == ["1", "2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_confirmed_patch_wins(remote: InMemoryTaskRemote) -> eyre::Result<()> {
    let (gated, board) = gated_board(&remote);
    board.refresh().await?;
    let mut updates = board.subscribe();
    let id = TaskId::from("2");

    let forward = board.transition(&id, TaskStatus::Completed);
    let backward = board.transition(&id, TaskStatus::Todo);
    let release = async {
        updates
            .wait_for(|view| view.loading)
            .await
            .map_err(|err| eyre::eyre!("view channel closed: {err}"))?;
        gated.patch_gate.notify_one();
        tokio::task::yield_now().await;
        gated.patch_gate.notify_one();
        Ok::<_, eyre::Report>(())
    };

    let (first, second, released) = tokio::join!(forward, backward, release);
    released?;
    ensure!(first? == Outcome::Applied);
    ensure!(second? == Outcome::Applied);

    let remote_status = remote
        .tasks()?
        .iter()
        .find(|task| task.id() == &id)
        .map(Task::status)
        .ok_or_else(|| eyre::eyre!("task 2 should still exist remotely"))?;
    let local_status = board
        .tasks()?
        .iter()
        .find(|task| task.id() == &id)
        .map(Task::status)
        .ok_or_else(|| eyre::eyre!("task 2 should still exist locally"))?;
    ensure!(local_status == remote_status);
    ensure!(!board.view().loading);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ungated_board_matches_remote_after_mixed_intents(
    remote: InMemoryTaskRemote,
) -> eyre::Result<()> {
    let board = board_over(&remote);
    board.refresh().await?;

    let moving = TaskId::from("2");
    let removing = TaskId::from("3");
    let (created, moved, removed) = tokio::join!(
        board.create("Parallel task"),
        board.move_task(&moving, Direction::Forward),
        board.remove(&removing),
    );
    ensure!(created? == Outcome::Applied);
    ensure!(moved? == Outcome::Applied);
    ensure!(removed? == Outcome::Applied);

    ensure!(board.tasks()? == remote.tasks()?);
    ensure!(lane_ids(&board, TaskStatus::Completed) == ["2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_confirmed_after_refetch_is_applied_once(
    remote: InMemoryTaskRemote,
) -> eyre::Result<()> {
    let (gated, board) = gated_board(&remote);
    board.refresh().await?;
    board.set_new_task_text("Parallel")?;
    let mut updates = board.subscribe();
    let reverting = TaskId::from("1");

    let pending_create = board.submit_new_task();
    let meanwhile = async {
        updates
            .wait_for(|view| view.loading)
            .await
            .map_err(|err| eyre::eyre!("view channel closed: {err}"))?;
        let reverted = board.edit(&reverting, "  ").await?;
        ensure!(reverted == Outcome::Reverted);
        ensure!(board.tasks()?.len() == 4, "refetch should load the new task");
        gated.create_gate.notify_one();
        Ok::<_, eyre::Report>(())
    };

    let (created, checked) = tokio::join!(pending_create, meanwhile);
    checked?;

    ensure!(created? == Outcome::Applied);
    let view = board.view();
    ensure!(view.new_task_text.is_empty());
    ensure!(!view.loading);
    ensure!(board.tasks()? == remote.tasks()?);
    ensure!(view.lanes.todo().len() == 2);
    Ok(())
}
