//! Then steps for board synchronisation BDD scenarios.

use super::world::{BoardWorld, operation};
use rstest_bdd_macros::then;
use taskboard::board::{
    adapters::memory::{RemoteOperation, RemoteRequest},
    domain::{TaskId, TaskPatch, TaskStatus},
    services::{BoardError, Outcome, SkipReason},
};

#[then(r#"no "{kind}" request was sent"#)]
fn no_request_sent(world: &BoardWorld, kind: String) -> Result<(), eyre::Report> {
    let sent = world.remote.count(operation(&kind)?)?;
    eyre::ensure!(sent == 0, "expected no {kind} request, found {sent}");
    Ok(())
}

#[then(r#"{count:usize} "{kind}" requests were sent"#)]
fn requests_sent(world: &BoardWorld, count: usize, kind: String) -> Result<(), eyre::Report> {
    let sent = world.remote.count(operation(&kind)?)?;
    eyre::ensure!(sent == count, "expected {count} {kind} requests, found {sent}");
    Ok(())
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.board.tasks()?.len();
    eyre::ensure!(held == count, "expected {count} tasks, found {held}");
    Ok(())
}

#[then("the intent is skipped as an illegal transition")]
fn skipped_as_illegal(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing intent result"))?;
    if !matches!(result, Ok(Outcome::Skipped(SkipReason::IllegalTransition))) {
        return Err(eyre::eyre!("expected illegal transition skip, got {result:?}"));
    }
    Ok(())
}

#[then("the intent fails with a remote error")]
fn fails_with_remote_error(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing intent result"))?;
    if !matches!(result, Err(BoardError::Remote(_))) {
        return Err(eyre::eyre!("expected remote error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"a status patch to "{status}" was sent for task "{id}""#)]
fn status_patch_sent(world: &BoardWorld, status: String, id: String) -> Result<(), eyre::Report> {
    let expected = RemoteRequest::Patch(
        TaskId::from(id),
        TaskPatch::status(TaskStatus::try_from(status.as_str())?),
    );
    let patches: Vec<RemoteRequest> = world
        .remote
        .requests()?
        .into_iter()
        .filter(|request| request.operation() == RemoteOperation::Patch)
        .collect();
    eyre::ensure!(patches == [expected], "unexpected patches: {patches:?}");
    Ok(())
}

#[then(r#"task "{id}" is in the "{lane}" lane"#)]
fn task_in_lane(world: &BoardWorld, id: String, lane: String) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(lane.as_str())?;
    let view = world.board.view();
    for (lane_status, tasks) in view.lanes.iter() {
        let present = tasks.iter().any(|task| task.id().as_str() == id);
        eyre::ensure!(
            present == (lane_status == status),
            "task {id} presence in {lane_status} lane was {present}"
        );
    }
    Ok(())
}

#[then(r#"the "{lane}" lane is empty"#)]
fn lane_is_empty(world: &BoardWorld, lane: String) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(lane.as_str())?;
    let view = world.board.view();
    eyre::ensure!(view.lanes.lane(status).is_empty(), "{lane} lane is not empty");
    Ok(())
}

#[then(r#"task "{id}" is not in edit mode"#)]
fn not_in_edit_mode(world: &BoardWorld, id: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.board.view().is_editing(&TaskId::from(id)),
        "task should have left edit mode"
    );
    Ok(())
}
