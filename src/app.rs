use crate::clock::{ClockRenderer, Overlay};
use crate::domain::{
    AutoplayCountdown, CountdownStep, CountdownTimer, Mascot, Task, TaskForm, Tick, TimerState,
    UiMode,
};
use crate::i18n::Translator;
use crate::notifications::FinishCue;
use crate::persistence::{Settings, Store};
use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use std::collections::HashMap;
use uuid::Uuid;

/// Main application state
pub struct AppState {
    pub tasks: Vec<Task>,
    /// Running countdowns, at most one per task
    pub timers: HashMap<Uuid, CountdownTimer>,
    pub selected: Option<Uuid>,
    pub countdown: Option<AutoplayCountdown>,
    pub settings: Settings,
    pub ui_mode: UiMode,
    pub form: Option<TaskForm>,
    pub clock: ClockRenderer,
    pub mascot: Mascot,
    pub translator: Translator,
    pub needs_save: bool,
    pub settings_need_save: bool,
    store: Box<dyn Store>,
    cue: Box<dyn FinishCue>,
}

impl AppState {
    pub fn new(
        tasks: Vec<Task>,
        settings: Settings,
        translator: Translator,
        store: Box<dyn Store>,
        cue: Box<dyn FinishCue>,
    ) -> Self {
        let selected = tasks
            .iter()
            .find(|t| !t.completed)
            .or_else(|| tasks.first())
            .map(|t| t.id);

        Self {
            tasks,
            timers: HashMap::new(),
            selected,
            countdown: None,
            settings,
            ui_mode: UiMode::Normal,
            form: None,
            clock: ClockRenderer::new(),
            mascot: Mascot::new(),
            translator,
            needs_save: false,
            settings_need_save: false,
            store,
            cue,
        }
    }

    /// Shorthand for a translated label
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.task(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.position(id))
    }

    pub fn timer_for(&self, id: Uuid) -> Option<&CountdownTimer> {
        self.timers.get(&id)
    }

    pub fn timer_state(&self, id: Uuid) -> TimerState {
        self.timers.get(&id).map_or(TimerState::Idle, |t| t.state())
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        match self.selected_index() {
            Some(i) if i > 0 => self.selected = Some(self.tasks[i - 1].id),
            Some(_) => {}
            None => self.selected = self.tasks.first().map(|t| t.id),
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        match self.selected_index() {
            Some(i) if i + 1 < self.tasks.len() => self.selected = Some(self.tasks[i + 1].id),
            Some(_) => {}
            None => self.selected = self.tasks.first().map(|t| t.id),
        }
    }

    /// First incomplete task after `id` in list order
    fn next_incomplete_after(&self, id: Uuid) -> Option<Uuid> {
        let start = self.position(id)? + 1;
        self.tasks[start..].iter().find(|t| !t.completed).map(|t| t.id)
    }

    /// Whether the selected task can be started right now
    pub fn can_start_selected(&self) -> bool {
        self.selected_task()
            .is_some_and(|t| !t.completed && !self.timers.contains_key(&t.id))
    }

    /// Start a countdown for the selected task
    pub fn start_selected(&mut self, now: DateTime<Local>) {
        self.cancel_countdown();
        if let Some(id) = self.selected {
            self.start_task(id, now);
        }
    }

    fn start_task(&mut self, id: Uuid, now: DateTime<Local>) {
        let Some(task) = self.task(id) else {
            return;
        };
        if task.completed || self.timers.contains_key(&id) {
            return;
        }
        let minutes = task.duration_minutes;

        let mut timer = CountdownTimer::new();
        timer.start(minutes, now);
        self.timers.insert(id, timer);
        tracing::info!(task = %id, minutes, "timer started");
    }

    /// Pause the selected task's countdown, or resume it if paused
    pub fn toggle_pause_selected(&mut self, now: DateTime<Local>) {
        self.cancel_countdown();
        let Some(id) = self.selected else {
            return;
        };
        let Some(timer) = self.timers.get_mut(&id) else {
            return;
        };
        if timer.is_paused() {
            timer.resume(now);
            tracing::info!(task = %id, "timer resumed");
        } else {
            timer.pause(now);
            tracing::info!(task = %id, "timer paused");
        }
    }

    /// Stop and discard the selected task's countdown
    pub fn stop_selected(&mut self) {
        self.cancel_countdown();
        if let Some(id) = self.selected {
            if let Some(mut timer) = self.timers.remove(&id) {
                timer.stop();
                tracing::info!(task = %id, "timer stopped");
            }
        }
    }

    /// Advance every timer, handle finished ones and refresh the clock overlays.
    /// Returns the IDs of tasks that finished on this frame.
    pub fn frame(&mut self, now: DateTime<Local>) -> Vec<Uuid> {
        self.poll_countdown(now);

        let mut finished = Vec::new();
        let mut overlays = Vec::new();

        for task in &self.tasks {
            let Some(timer) = self.timers.get_mut(&task.id) else {
                continue;
            };
            match timer.tick(now) {
                Tick::Finished => finished.push(task.id),
                Tick::Active(remaining) if remaining > Duration::zero() => {
                    if let Some(end_time) = timer.end_time(now) {
                        overlays.push(Overlay::new(now, end_time, task.color.clone()));
                    }
                }
                Tick::Active(_) | Tick::Inactive => {}
            }
        }

        for id in &finished {
            self.finish_task(*id, now);
        }

        match overlays.len() {
            0 => self.clock.clear_overlay(),
            1 => {
                let only = &overlays[0];
                self.clock.set_overlay(only.start_time, only.end_time, &only.color);
            }
            _ => self.clock.set_overlays(overlays),
        }
        self.mascot.tick(now);
        finished
    }

    fn finish_task(&mut self, id: Uuid, now: DateTime<Local>) {
        self.timers.remove(&id);

        let Some(task) = self.task_mut(id) else {
            return;
        };
        task.completed = true;
        let name = task.name.clone();
        tracing::info!(task = %id, name = %name, "task finished");

        self.mascot.celebrate(now);
        self.cue.play_finish_cue(&name);
        self.needs_save = true;

        if self.selected != Some(id) {
            return;
        }
        if let Some(next) = self.next_incomplete_after(id) {
            self.selected = Some(next);
            if self.settings.autoplay {
                self.begin_countdown(next, now);
            }
        }
    }

    fn begin_countdown(&mut self, id: Uuid, now: DateTime<Local>) {
        tracing::debug!(task = %id, "autoplay countdown started");
        self.countdown = Some(AutoplayCountdown::new(id, now));
    }

    fn poll_countdown(&mut self, now: DateTime<Local>) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        if countdown.poll(now) == CountdownStep::Done {
            let id = countdown.task();
            self.cancel_countdown();
            self.start_task(id, now);
        }
    }

    /// Drop any pending autoplay countdown. Safe to call repeatedly.
    pub fn cancel_countdown(&mut self) {
        if self.countdown.take().is_some() {
            tracing::debug!("autoplay countdown cancelled");
        }
    }

    /// Text for the main timer display
    pub fn display_text(&self, now: DateTime<Local>) -> String {
        if let (Some(countdown), Some(id)) = (&self.countdown, self.selected) {
            if countdown.task() == id {
                return countdown.label();
            }
        }
        let remaining = self
            .selected
            .and_then(|id| self.timers.get(&id))
            .map_or(Duration::zero(), |t| t.remaining(now));
        crate::domain::format_time(remaining)
    }

    pub fn toggle_autoplay(&mut self) {
        self.set_autoplay(!self.settings.autoplay);
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.settings.autoplay = enabled;
        self.settings_need_save = true;
        if !enabled {
            self.cancel_countdown();
        }
    }

    /// Delete a task, stopping its countdown first
    pub fn delete_task(&mut self, id: Uuid) {
        let Some(index) = self.position(id) else {
            return;
        };
        if let Some(mut timer) = self.timers.remove(&id) {
            timer.stop();
        }
        if self.countdown.as_ref().is_some_and(|c| c.task() == id) {
            self.cancel_countdown();
        }

        self.tasks.remove(index);
        tracing::info!(task = %id, "task deleted");

        if self.selected == Some(id) {
            // Follow the task that moved into the gap, else the one before it
            self.selected = self
                .tasks
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tasks.get(i)))
                .map(|t| t.id);
        }
        self.needs_save = true;
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected {
            self.delete_task(id);
        }
    }

    /// Mark every task incomplete and stop all countdowns
    pub fn reset_all(&mut self) {
        self.cancel_countdown();
        for (_, mut timer) in self.timers.drain() {
            timer.stop();
        }
        for task in &mut self.tasks {
            task.completed = false;
        }
        self.selected = self.tasks.first().map(|t| t.id);
        self.needs_save = true;
        tracing::info!("all tasks reset");
    }

    /// Add a task directly (for testing and programmatic use)
    pub fn add_task(&mut self, name: String, duration_minutes: u32, color: String) -> Uuid {
        let task = Task::new(name, duration_minutes, color);
        let id = task.id;
        self.tasks.push(task);
        if self.tasks.len() == 1 {
            self.selected = Some(id);
        }
        self.needs_save = true;
        id
    }

    /// Open the form for a new task
    pub fn open_add_form(&mut self) {
        self.form = Some(TaskForm::new_task());
        self.ui_mode = UiMode::TaskForm;
    }

    /// Open the form pre-filled with the selected task
    pub fn open_edit_form(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(TaskForm::edit(task.id, &task.name, task.duration_minutes, &task.color));
            self.ui_mode = UiMode::TaskForm;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Apply the form. Invalid input keeps the form open with focus on the offending field.
    pub fn submit_form(&mut self) {
        if self.apply_form() {
            self.cancel_form();
        }
    }

    /// Add the task and reset the form for another one. Only for new tasks.
    pub fn submit_form_and_add_another(&mut self) {
        if self.form.as_ref().map_or(true, |f| f.is_editing()) {
            return;
        }
        if self.apply_form() {
            if let Some(form) = &mut self.form {
                form.reset();
            }
        }
    }

    fn apply_form(&mut self) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        let (name, minutes) = match form.validate() {
            Ok(valid) => valid,
            Err(e) => {
                form.field = e.field();
                form.error = Some(e);
                return false;
            }
        };
        let color = form.color.clone();
        let editing = form.editing;

        match editing {
            Some(id) => {
                if let Some(task) = self.task_mut(id) {
                    task.name = name;
                    task.duration_minutes = minutes;
                    task.color = color;
                    self.needs_save = true;
                }
            }
            None => {
                self.add_task(name, minutes, color);
            }
        }
        true
    }

    /// Persist whatever changed since the last save
    pub fn save(&mut self) -> Result<()> {
        if self.needs_save {
            self.store.save_tasks(&self.tasks)?;
            self.needs_save = false;
        }
        if self.settings_need_save {
            self.store.save_settings(&self.settings)?;
            self.settings_need_save = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormField;
    use crate::persistence::JsonStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingCue(Rc<RefCell<Vec<String>>>);

    impl FinishCue for RecordingCue {
        fn play_finish_cue(&self, task_name: &str) {
            self.0.borrow_mut().push(task_name.to_string());
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
    }

    fn create_test_app(dir: &std::path::Path) -> (AppState, RecordingCue) {
        let cue = RecordingCue::default();
        let tasks = vec![
            Task::new("Brush teeth".to_string(), 5, "#4A90D9".to_string()),
            Task::new("Get dressed".to_string(), 10, "#38A169".to_string()),
            Task::new("Pack bag".to_string(), 3, "#E53E3E".to_string()),
        ];
        let app = AppState::new(
            tasks,
            Settings::default(),
            Translator::new("en"),
            Box::new(JsonStore::new(dir)),
            Box::new(cue.clone()),
        );
        (app, cue)
    }

    fn names(app: &AppState) -> Vec<&str> {
        app.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_app_state_new_selects_first_incomplete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        assert_eq!(app.selected_index(), Some(0));

        app.tasks[0].completed = true;
        let tasks = app.tasks.clone();
        let app = AppState::new(
            tasks,
            Settings::default(),
            Translator::new("en"),
            Box::new(JsonStore::new(temp_dir.path())),
            Box::new(RecordingCue::default()),
        );
        assert_eq!(app.selected_index(), Some(1));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_move_selection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());

        app.select_next();
        assert_eq!(app.selected_index(), Some(1));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index(), Some(2));

        app.select_previous();
        assert_eq!(app.selected_index(), Some(1));
        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected_index(), Some(0));
    }

    #[test]
    fn test_start_then_frame_shows_full_duration() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.start_selected(now);
        assert!(app.frame(now).is_empty());
        assert_eq!(app.display_text(now), "05:00");
        assert_eq!(app.timer_state(app.tasks[0].id), TimerState::Running);
        assert_eq!(app.clock.overlays().len(), 1);
        assert_eq!(app.clock.overlays()[0].end_time, now + Duration::minutes(5));
        assert_eq!(app.clock.overlays()[0].color, "#4A90D9");
    }

    #[test]
    fn test_start_ignored_for_completed_or_running() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.start_selected(now);
        app.start_selected(now + Duration::minutes(2));
        let id = app.tasks[0].id;
        assert_eq!(app.timer_for(id).unwrap().end_time(now), Some(now + Duration::minutes(5)));

        app.select_next();
        app.tasks[1].completed = true;
        assert!(!app.can_start_selected());
        app.start_selected(now);
        assert!(!app.timers.contains_key(&app.tasks[1].id));
    }

    #[test]
    fn test_multiple_timers_run_side_by_side() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.start_selected(now);
        app.select_next();
        app.start_selected(now + Duration::minutes(1));
        app.frame(now + Duration::minutes(2));

        assert_eq!(app.timers.len(), 2);
        let colors: Vec<&str> = app.clock.overlays().iter().map(|o| o.color.as_str()).collect();
        assert_eq!(colors, vec!["#4A90D9", "#38A169"]);
        assert_eq!(app.display_text(now + Duration::minutes(2)), "09:00");
    }

    #[test]
    fn test_pause_and_resume_selected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);
        let id = app.tasks[0].id;

        app.start_selected(now);
        app.toggle_pause_selected(now + Duration::minutes(1));
        assert_eq!(app.timer_state(id), TimerState::Paused);

        // Frozen for ten minutes, overlay keeps its size and follows now
        let later = now + Duration::minutes(11);
        assert!(app.frame(later).is_empty());
        assert_eq!(app.display_text(later), "04:00");
        assert_eq!(app.clock.overlays()[0].end_time, later + Duration::minutes(4));

        app.toggle_pause_selected(later);
        assert_eq!(app.timer_state(id), TimerState::Running);
        assert_eq!(app.display_text(later + Duration::minutes(1)), "03:00");
    }

    #[test]
    fn test_stop_selected_discards_timer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.start_selected(now);
        app.stop_selected();
        app.stop_selected();
        assert!(app.timers.is_empty());
        app.frame(now);
        assert!(app.clock.overlays().is_empty());
        assert_eq!(app.display_text(now), "00:00");
    }

    #[test]
    fn test_finish_marks_task_complete_and_advances() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, cue) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);
        let first = app.tasks[0].id;

        app.start_selected(now);
        app.frame(now + Duration::minutes(2));
        let finished = app.frame(now + Duration::minutes(5));

        assert_eq!(finished, vec![first]);
        assert!(app.tasks[0].completed);
        assert!(!app.timers.contains_key(&first));
        assert_eq!(app.selected_index(), Some(1));
        assert!(app.mascot.is_celebrating(now + Duration::minutes(5)));
        assert_eq!(cue.0.borrow().clone(), vec!["Brush teeth".to_string()]);
        assert!(app.needs_save);
        assert!(app.countdown.is_none());
        assert!(app.clock.overlays().is_empty());

        // Finish is handled once
        assert!(app.frame(now + Duration::minutes(6)).is_empty());
        assert_eq!(cue.0.borrow().len(), 1);
    }

    #[test]
    fn test_finish_of_unselected_task_keeps_selection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.select_next();
        app.select_next();
        app.start_selected(now);
        app.select_previous();

        app.frame(now + Duration::minutes(3));
        assert!(app.tasks[2].completed);
        assert_eq!(app.selected_index(), Some(1));
    }

    #[test]
    fn test_finish_skips_completed_tasks_when_advancing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);
        app.tasks[1].completed = true;

        app.start_selected(now);
        app.frame(now + Duration::minutes(5));
        assert_eq!(app.selected_index(), Some(2));
    }

    #[test]
    fn test_autoplay_countdown_starts_next_task() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        app.set_autoplay(true);
        let now = at(7, 0, 0);
        let second = app.tasks[1].id;

        app.start_selected(now);
        let done = now + Duration::minutes(5);
        app.frame(done);
        assert_eq!(app.display_text(done), "3...");

        app.frame(done + Duration::seconds(1));
        assert_eq!(app.display_text(done + Duration::seconds(1)), "2...");
        app.frame(done + Duration::seconds(2));
        assert_eq!(app.display_text(done + Duration::seconds(2)), "1...");
        assert!(!app.timers.contains_key(&second));

        let go = done + Duration::seconds(3);
        app.frame(go);
        assert!(app.countdown.is_none());
        assert_eq!(app.timer_state(second), TimerState::Running);
        assert_eq!(app.display_text(go), "10:00");
    }

    #[test]
    fn test_countdown_cancelled_by_stop_and_autoplay_off() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        app.set_autoplay(true);
        let now = at(7, 0, 0);

        app.start_selected(now);
        app.frame(now + Duration::minutes(5));
        assert!(app.countdown.is_some());
        app.stop_selected();
        assert!(app.countdown.is_none());
        app.frame(now + Duration::minutes(6));
        assert!(app.timers.is_empty());

        // Second task finishes and arms a countdown for the third
        assert_eq!(app.selected_index(), Some(1));
        let restart = now + Duration::minutes(6);
        app.start_selected(restart);
        app.frame(restart + Duration::minutes(10));
        assert_eq!(app.selected_index(), Some(2));
        assert!(app.countdown.is_some());
        app.set_autoplay(false);
        app.cancel_countdown();
        assert!(app.countdown.is_none());
        assert!(app.settings_need_save);
    }

    #[test]
    fn test_pause_key_cancels_countdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        app.set_autoplay(true);
        let now = at(7, 0, 0);
        let second = app.tasks[1].id;

        app.start_selected(now);
        app.frame(now + Duration::minutes(5));
        assert!(app.countdown.is_some());

        app.toggle_pause_selected(now + Duration::minutes(5));
        assert!(app.countdown.is_none());
        app.frame(now + Duration::minutes(6));
        assert_eq!(app.timer_state(second), TimerState::Idle);
    }

    #[test]
    fn test_delete_running_task_stops_its_timer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.select_next();
        let doomed = app.selected.unwrap();
        app.start_selected(now);
        app.delete_selected();

        assert!(!app.timers.contains_key(&doomed));
        assert_eq!(names(&app), vec!["Brush teeth", "Pack bag"]);
        assert_eq!(app.selected_task().unwrap().name, "Pack bag");
        app.frame(now);
        assert!(app.clock.overlays().is_empty());
    }

    #[test]
    fn test_delete_keeps_timers_on_later_tasks() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);
        let last = app.tasks[2].id;

        app.selected = Some(last);
        app.start_selected(now);
        let first = app.tasks[0].id;
        app.delete_task(first);

        // The timer stays with its task, now at index 1
        assert_eq!(app.tasks[1].id, last);
        assert_eq!(app.timer_state(app.tasks[1].id), TimerState::Running);
        assert_eq!(app.selected_index(), Some(1));
        app.frame(now + Duration::minutes(1));
        assert_eq!(app.clock.overlays()[0].color, "#E53E3E");
    }

    #[test]
    fn test_delete_last_selected_moves_to_previous() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        app.selected = Some(app.tasks[2].id);
        app.delete_selected();
        assert_eq!(app.selected_index(), Some(1));

        app.delete_selected();
        app.delete_selected();
        assert!(app.tasks.is_empty());
        assert_eq!(app.selected, None);
        app.delete_selected();
    }

    #[test]
    fn test_delete_countdown_target_cancels_countdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        app.set_autoplay(true);
        let now = at(7, 0, 0);

        app.start_selected(now);
        app.frame(now + Duration::minutes(5));
        app.delete_selected();
        assert!(app.countdown.is_none());
    }

    #[test]
    fn test_reset_all() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);
        app.tasks[0].completed = true;
        app.select_next();
        app.start_selected(now);

        app.reset_all();
        assert!(app.tasks.iter().all(|t| !t.completed));
        assert!(app.timers.is_empty());
        assert_eq!(app.selected_index(), Some(0));
    }

    #[test]
    fn test_add_form_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());

        app.open_add_form();
        assert_eq!(app.ui_mode, UiMode::TaskForm);
        app.submit_form();
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.field, FormField::Name);
        assert_eq!(app.tasks.len(), 3);

        let form = app.form.as_mut().unwrap();
        form.name = "Feed the cat".to_string();
        form.duration = "0".to_string();
        app.submit_form();
        assert_eq!(app.form.as_ref().unwrap().field, FormField::Duration);
        assert_eq!(app.tasks.len(), 3);

        let form = app.form.as_mut().unwrap();
        form.duration = "2".to_string();
        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks[3].name, "Feed the cat");
        assert_eq!(app.tasks[3].duration_minutes, 2);
        assert_eq!(app.tasks[3].color, "#4A90D9");
    }

    #[test]
    fn test_save_and_add_another() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());

        app.open_add_form();
        let form = app.form.as_mut().unwrap();
        form.name = "Shoes".to_string();
        form.cycle_color(true);
        app.submit_form_and_add_another();

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.duration, "15");
        assert_eq!(form.color, "#4A90D9");
        assert_eq!(app.tasks.len(), 4);
        assert_eq!(app.tasks[3].color, "#E53E3E");
    }

    #[test]
    fn test_edit_form_updates_task_in_place() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let id = app.tasks[0].id;

        app.open_edit_form();
        // Not offered while editing
        app.submit_form_and_add_another();
        assert!(app.form.is_some());

        let form = app.form.as_mut().unwrap();
        form.name = "Brush teeth well".to_string();
        form.duration = "6".to_string();
        app.submit_form();

        assert_eq!(app.tasks.len(), 3);
        assert_eq!(app.tasks[0].id, id);
        assert_eq!(app.tasks[0].name, "Brush teeth well");
        assert_eq!(app.tasks[0].duration_minutes, 6);
    }

    #[test]
    fn test_first_task_added_is_selected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::new(
            Vec::new(),
            Settings::default(),
            Translator::new("en"),
            Box::new(JsonStore::new(temp_dir.path())),
            Box::new(RecordingCue::default()),
        );
        assert_eq!(app.selected, None);

        let id = app.add_task("Brush teeth".to_string(), 5, "#4A90D9".to_string());
        assert_eq!(app.selected, Some(id));
        app.add_task("Get dressed".to_string(), 10, "#38A169".to_string());
        assert_eq!(app.selected, Some(id));
    }

    #[test]
    fn test_save_persists_tasks_and_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app(temp_dir.path());
        let now = at(7, 0, 0);

        app.set_autoplay(true);
        app.start_selected(now);
        app.frame(now + Duration::minutes(5));
        app.save().unwrap();
        assert!(!app.needs_save);
        assert!(!app.settings_need_save);

        let store = JsonStore::new(temp_dir.path());
        let tasks = store.load_tasks();
        assert_eq!(tasks.len(), 3);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert!(store.load_settings().autoplay);
    }

    /// Fails the first write of each kind, then writes through
    struct FailOnceStore {
        inner: JsonStore,
        tasks_failed: Cell<bool>,
        settings_failed: Cell<bool>,
    }

    impl Store for FailOnceStore {
        fn load_tasks(&self) -> Vec<Task> {
            self.inner.load_tasks()
        }

        fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
            if !self.tasks_failed.replace(true) {
                anyhow::bail!("disk full");
            }
            self.inner.save_tasks(tasks)
        }

        fn load_settings(&self) -> Settings {
            self.inner.load_settings()
        }

        fn save_settings(&self, settings: &Settings) -> Result<()> {
            if !self.settings_failed.replace(true) {
                anyhow::bail!("disk full");
            }
            self.inner.save_settings(settings)
        }
    }

    #[test]
    fn test_failed_save_is_retried() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FailOnceStore {
            inner: JsonStore::new(temp_dir.path()),
            tasks_failed: Cell::new(false),
            settings_failed: Cell::new(false),
        };
        let mut app = AppState::new(
            Vec::new(),
            Settings::default(),
            Translator::new("en"),
            Box::new(store),
            Box::new(RecordingCue::default()),
        );

        app.add_task("Brush teeth".to_string(), 5, "#4A90D9".to_string());
        assert!(app.save().is_err());
        assert!(app.needs_save);

        // Tasks now write; settings fail their first attempt
        app.set_autoplay(true);
        assert!(app.save().is_err());
        assert!(!app.needs_save);
        assert!(app.settings_need_save);

        app.save().unwrap();
        assert!(!app.settings_need_save);

        let disk = JsonStore::new(temp_dir.path());
        let tasks = disk.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Brush teeth");
        assert!(disk.load_settings().autoplay);
    }

    #[test]
    fn test_end_to_end_brush_teeth() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::new(
            Vec::new(),
            Settings::default(),
            Translator::new("de"),
            Box::new(JsonStore::new(temp_dir.path())),
            Box::new(RecordingCue::default()),
        );
        let start = at(7, 30, 0);

        app.open_add_form();
        for c in "Brush teeth".chars() {
            app.form.as_mut().unwrap().add_char(c);
        }
        let form = app.form.as_mut().unwrap();
        form.field = FormField::Duration;
        form.backspace();
        form.backspace();
        form.add_char('5');
        app.submit_form_and_add_another();
        let form = app.form.as_mut().unwrap();
        form.name = "Get dressed".to_string();
        app.submit_form();

        let brush = app.tasks[0].id;
        assert_eq!(app.selected, Some(brush));
        app.start_selected(start);

        let mut now = start;
        while now < start + Duration::minutes(5) {
            now = now + Duration::milliseconds(250);
            app.frame(now);
        }

        assert!(app.tasks[0].completed);
        assert!(!app.timers.contains_key(&brush));
        assert_eq!(app.selected_task().unwrap().name, "Get dressed");
    }
}
