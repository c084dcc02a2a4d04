use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{Task, TaskStatus};
use std::collections::HashSet;
use web_sys::{console, window};

pub mod api;
pub mod form;

use form::{Field, TaskForm};

const STATUS_CHOICES: [TaskStatus; 3] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    TasksLoaded(Vec<Task>),
    LoadFailed(String),
    SetNewField(Field, String),
    CreateTask,
    TaskCreated(Task),
    ChangeStatus(i64, TaskStatus),
    TaskUpdated(Task),
    EditTask(i64),
    SetEditField(Field, String),
    SaveEdit(i64),
    CancelEdit,
    DeleteTask(i64),
    TaskDeleted(i64),
    ToggleCompletedSection,
    RequestFailed(Option<i64>, String),
    DismissError,
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    new_task: TaskForm,
    editing_task: Option<i64>,
    edit_form: TaskForm,
    show_completed: bool,
    busy: HashSet<i64>,
}

/// Counts shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl Summary {
    pub fn of(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            match task.status {
                _ if task.completed => summary.completed += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                _ => summary.pending += 1,
            }
            summary
        })
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        self.show_completed = true;
        Cmd::new(async { Msg::LoadTasks })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTasks => {
                self.loading = true;
                Cmd::new(async {
                    match api::list_tasks().await {
                        Ok(tasks) => Msg::TasksLoaded(tasks),
                        Err(e) => Msg::LoadFailed(e.user_message()),
                    }
                })
            }
            Msg::TasksLoaded(tasks) => {
                console::log_1(&format!("loaded {} tasks", tasks.len()).into());
                self.tasks = tasks;
                self.loading = false;
                self.error = None;
                Cmd::none()
            }
            Msg::LoadFailed(error) => {
                // Keep the page usable with an empty list, but say why it is empty.
                console::log_1(&format!("Error loading tasks: {}", error).into());
                self.tasks.clear();
                self.loading = false;
                self.error = Some(format!("Could not load tasks: {}", error));
                Cmd::none()
            }
            Msg::SetNewField(field, value) => {
                self.new_task.set(field, value);
                Cmd::none()
            }
            Msg::CreateTask => {
                let request = match self.new_task.to_create_request() {
                    Ok(request) => request,
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return Cmd::none();
                    }
                };
                self.new_task.clear();

                Cmd::new(async move {
                    match api::create_task(&request).await {
                        Ok(task) => Msg::TaskCreated(task),
                        Err(e) => Msg::RequestFailed(None, e.user_message()),
                    }
                })
            }
            Msg::TaskCreated(task) => {
                self.error = None;
                self.tasks.push(task);
                Cmd::none()
            }
            Msg::ChangeStatus(id, status) => {
                self.busy.insert(id);
                let request = form::status_change(id, status);
                Cmd::new(async move {
                    match api::update_task(&request).await {
                        Ok(task) => Msg::TaskUpdated(task),
                        Err(e) => Msg::RequestFailed(Some(id), e.user_message()),
                    }
                })
            }
            Msg::TaskUpdated(updated) => {
                self.busy.remove(&updated.id);
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
                    *task = updated;
                }
                Cmd::none()
            }
            Msg::EditTask(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                    self.editing_task = Some(id);
                    self.edit_form = TaskForm::from_task(task);
                }
                Cmd::none()
            }
            Msg::SetEditField(field, value) => {
                self.edit_form.set(field, value);
                Cmd::none()
            }
            Msg::SaveEdit(id) => {
                if self.editing_task != Some(id) {
                    return Cmd::none();
                }
                let request = match self.edit_form.to_update_request(id) {
                    Ok(request) => request,
                    Err(e) => {
                        self.error = Some(e.to_string());
                        return Cmd::none();
                    }
                };

                self.busy.insert(id);
                self.editing_task = None;

                Cmd::new(async move {
                    match api::update_task(&request).await {
                        Ok(task) => Msg::TaskUpdated(task),
                        Err(e) => Msg::RequestFailed(Some(id), e.user_message()),
                    }
                })
            }
            Msg::CancelEdit => {
                self.editing_task = None;
                self.edit_form.clear();
                Cmd::none()
            }
            Msg::DeleteTask(id) => {
                let confirmed = window()
                    .and_then(|w| w.confirm_with_message("Are you sure you want to delete this task?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return Cmd::none();
                }

                self.busy.insert(id);
                Cmd::new(async move {
                    match api::delete_task(id).await {
                        Ok(()) => Msg::TaskDeleted(id),
                        Err(e) => Msg::RequestFailed(Some(id), e.user_message()),
                    }
                })
            }
            Msg::TaskDeleted(id) => {
                self.tasks.retain(|t| t.id != id);
                self.busy.remove(&id);
                Cmd::none()
            }
            Msg::ToggleCompletedSection => {
                self.show_completed = !self.show_completed;
                Cmd::none()
            }
            Msg::RequestFailed(id, error) => {
                console::log_1(&format!("Error: {}", error).into());
                if let Some(id) = id {
                    self.busy.remove(&id);
                }
                self.error = Some(error);
                Cmd::none()
            }
            Msg::DismissError => {
                self.error = None;
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
                    div([class("max-w-6xl mx-auto px-6 py-4")], [
                        h1([class("text-2xl font-bold text-ctp-text")], [text("Tarefas")]),
                    ]),
                ]),
                div(
                    [class("max-w-6xl mx-auto px-6 py-8 space-y-8")],
                    [
                        self.view_error(),
                        self.view_summary(),
                        div([class("bg-ctp-surface0 rounded-lg shadow-lg p-6 border border-ctp-surface1")], [
                            self.view_create_form(),
                            if self.loading {
                                div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Loading...")])
                            } else {
                                self.view_task_list()
                            },
                        ]),
                    ],
                ),
            ],
        )
    }
}

impl Model {
    fn view_error(&self) -> Node<Msg> {
        match &self.error {
            Some(error) => div(
                [class("flex items-center justify-between bg-ctp-red/20 text-ctp-red rounded-lg px-4 py-3")],
                [
                    span([], [text(error)]),
                    button([on_click(|_| Msg::DismissError), class("font-bold px-2")], [text("×")]),
                ],
            ),
            None => span([], []),
        }
    }

    fn view_summary(&self) -> Node<Msg> {
        let summary = Summary::of(&self.tasks);
        div([class("grid grid-cols-2 md:grid-cols-4 gap-6")], [
            stat_card("Total Tasks", summary.total),
            stat_card("Pending", summary.pending),
            stat_card("In Progress", summary.in_progress),
            stat_card("Completed", summary.completed),
        ])
    }

    fn view_create_form(&self) -> Node<Msg> {
        div(
            [class("mb-8 p-6 bg-ctp-surface1 rounded-lg border border-ctp-surface2")],
            [
                h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [text("Add New Task")]),
                div([class("space-y-4")], [
                    text_input("Task title", &self.new_task.title, |v| Msg::SetNewField(Field::Title, v)),
                    textarea([
                        placeholder("Task description"),
                        value(&self.new_task.description),
                        on_input(|event| Msg::SetNewField(Field::Description, event.value())),
                        class(INPUT_CLASS),
                    ], []),
                    div([class("flex gap-4")], [
                        status_select(&self.new_task.status, |v| Msg::SetNewField(Field::Status, v)),
                        input([
                            r#type("datetime-local"),
                            value(&self.new_task.created_at),
                            on_input(|event| Msg::SetNewField(Field::CreatedAt, event.value())),
                            class(INPUT_CLASS),
                        ], []),
                    ]),
                    button([
                        on_click(|_| Msg::CreateTask),
                        class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Add Task")]),
                ]),
            ],
        )
    }

    fn view_task_list(&self) -> Node<Msg> {
        let (completed_tasks, open_tasks): (Vec<&Task>, Vec<&Task>) =
            self.tasks.iter().partition(|t| t.completed);

        div(
            [class("space-y-8")],
            [
                div([], [
                    h2([class("text-xl font-semibold text-ctp-text pb-2 mb-4 border-b border-ctp-surface2")], [
                        text(&format!("Active Tasks ({})", open_tasks.len())),
                    ]),
                    if open_tasks.is_empty() {
                        div([class("text-center py-12 text-ctp-subtext0")], [
                            text("No active tasks. Create a new one above to get started!"),
                        ])
                    } else {
                        div([class("space-y-4")], open_tasks.iter().map(|task| self.view_task(task)).collect::<Vec<_>>())
                    },
                ]),
                if completed_tasks.is_empty() {
                    span([], [])
                } else {
                    div([class("border-t border-ctp-surface1 pt-8")], [
                        button([
                            on_click(|_| Msg::ToggleCompletedSection),
                            class("flex items-center space-x-2 text-xl font-semibold text-ctp-text hover:text-ctp-blue mb-4"),
                        ], [
                            span([], [text(&format!("Completed Tasks ({})", completed_tasks.len()))]),
                            span([class("text-sm")], [text(if self.show_completed { "▼" } else { "▶" })]),
                        ]),
                        if self.show_completed {
                            div([class("space-y-3")], completed_tasks.iter().map(|task| self.view_task(task)).collect::<Vec<_>>())
                        } else {
                            span([], [])
                        },
                    ])
                },
            ],
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let is_busy = self.busy.contains(&task.id);
        let task_id = task.id;

        if self.editing_task == Some(task.id) {
            return div([key(task.id.to_string()), class("border rounded-xl p-6 bg-ctp-surface0 space-y-3")], [
                h3([class("font-medium text-ctp-text")], [text(&task.title)]),
                textarea([
                    value(&self.edit_form.description),
                    on_input(|event| Msg::SetEditField(Field::Description, event.value())),
                    class(INPUT_CLASS),
                ], []),
                status_select(&self.edit_form.status, |v| Msg::SetEditField(Field::Status, v)),
                div([class("flex gap-2")], [
                    button([
                        on_click(move |_| Msg::SaveEdit(task_id)),
                        class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md"),
                        disabled(is_busy),
                    ], [text(if is_busy { "Saving..." } else { "Save" })]),
                    button([
                        on_click(|_| Msg::CancelEdit),
                        class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md"),
                    ], [text("Cancel")]),
                ]),
            ]);
        }

        let next_status = if task.completed { TaskStatus::Pending } else { TaskStatus::Completed };

        div(
            [
                key(task.id.to_string()),
                class(&format!(
                    "border rounded-xl p-6 bg-ctp-surface0 shadow-sm {}",
                    if task.completed { "border-ctp-green bg-ctp-green/10" } else { "border-ctp-surface1" }
                )),
            ],
            [div([class("flex items-start gap-4")], [
                input([
                    r#type("checkbox"),
                    checked(task.completed),
                    disabled(is_busy),
                    on_click(move |_| Msg::ChangeStatus(task_id, next_status.clone())),
                ], []),
                div([class("flex-1 min-w-0")], [
                    h3([class(if task.completed { "text-lg font-semibold line-through text-ctp-overlay1" } else { "text-lg font-semibold" })], [
                        text(&task.title),
                    ]),
                    p([class("text-sm text-ctp-subtext1 break-words")], [text(&task.description)]),
                    div([class("mt-3 flex gap-3 text-xs text-ctp-subtext0")], [
                        span([class("px-2 py-1 rounded-full bg-ctp-surface1")], [
                            text(if is_busy { "Updating..." } else { task.status.label() }),
                        ]),
                        span([], [text(&format!("Created {}", task.created_at.format("%Y-%m-%d %H:%M")))]),
                        match task.completed_at {
                            Some(at) if task.completed => span([], [text(&format!("Completed {}", at.format("%Y-%m-%d %H:%M")))]),
                            _ => span([], []),
                        },
                    ]),
                ]),
                div([class("flex flex-col gap-2")], [
                    button([
                        on_click(move |_| Msg::EditTask(task_id)),
                        class("w-8 h-8 rounded-lg bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30"),
                        r#type("button"),
                        disabled(is_busy),
                    ], [text("✏️")]),
                    button([
                        on_click(move |_| Msg::DeleteTask(task_id)),
                        class("w-8 h-8 rounded-lg bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30"),
                        r#type("button"),
                        disabled(is_busy),
                    ], [text(if is_busy { "⏳" } else { "🗑️" })]),
                ]),
            ])],
        )
    }
}

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue";

fn stat_card(card_title: &str, count: usize) -> Node<Msg> {
    div([class("bg-ctp-surface0 rounded-lg p-6 border border-ctp-surface1 text-center")], [
        h3([class("text-sm font-medium text-ctp-subtext0 mb-2")], [text(card_title)]),
        p([class("text-3xl font-bold text-ctp-text")], [text(&count.to_string())]),
    ])
}

fn text_input(hint: &str, current: &str, on_change_value: fn(String) -> Msg) -> Node<Msg> {
    input([
        r#type("text"),
        placeholder(hint.to_string()),
        value(current.to_string()),
        on_input(move |event| on_change_value(event.value())),
        class(INPUT_CLASS),
    ], [])
}

/// The fixed statuses, plus the current one when it is a free-form label.
fn status_choices(current: &TaskStatus) -> Vec<TaskStatus> {
    let mut choices = STATUS_CHOICES.to_vec();
    if !choices.contains(current) {
        choices.push(current.clone());
    }
    choices
}

fn status_select(current: &str, on_pick: fn(String) -> Msg) -> Node<Msg> {
    let current = TaskStatus::parse(current).unwrap_or_default();
    select(
        [on_change(move |event| on_pick(event.value())), class(INPUT_CLASS)],
        status_choices(&current)
            .iter()
            .map(|status| {
                option(
                    [value(status.label().to_string()), selected(*status == current)],
                    [text(status.label())],
                )
            })
            .collect::<Vec<_>>(),
    )
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: String::new(),
            completed: status.is_completed(),
            status,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn summary_counts_by_state() {
        let tasks = vec![
            task(1, TaskStatus::Pending),
            task(2, TaskStatus::InProgress),
            task(3, TaskStatus::Completed),
            task(4, TaskStatus::Other("Bloqueada".to_string())),
            task(5, TaskStatus::Completed),
        ];

        assert_eq!(
            Summary::of(&tasks),
            Summary {
                total: 5,
                pending: 2,
                in_progress: 1,
                completed: 2,
            }
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn free_form_status_gets_its_own_choice() {
        let blocked = TaskStatus::Other("Bloqueada".to_string());
        let choices = status_choices(&blocked);
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.last(), Some(&blocked));

        assert_eq!(status_choices(&TaskStatus::InProgress), STATUS_CHOICES.to_vec());
    }
}
