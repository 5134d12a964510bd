//! When steps for board synchronisation BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::{Direction, TaskId};

#[when(r#"a task is created with text "{text}""#)]
fn create_task(world: &mut BoardWorld, text: String) {
    world.last_result = Some(run_async(world.board.create(&text)));
}

#[when(r#"task "{id}" is moved "{direction}""#)]
fn move_task(world: &mut BoardWorld, id: String, direction: String) -> Result<(), eyre::Report> {
    let parsed = Direction::try_from(direction.as_str())?;
    world.last_result = Some(run_async(world.board.move_task(&TaskId::from(id), parsed)));
    Ok(())
}

#[when(r#"task "{id}" is deleted"#)]
fn delete_task(world: &mut BoardWorld, id: String) {
    world.last_result = Some(run_async(world.board.remove(&TaskId::from(id))));
}

#[when(r#"the text of task "{id}" is cleared and committed"#)]
fn clear_and_commit(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::from(id);
    world.board.update_edit_draft(&task_id, "")?;
    world.last_result = Some(run_async(world.board.edit(&task_id, "")));
    Ok(())
}
