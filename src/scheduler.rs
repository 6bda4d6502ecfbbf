//! Cooperative periodic tasks that mutate the scene.
//!
//! The host calls [`Scheduler::poll`] from its main loop, between frames.
//! Tasks take `&mut Scene`, so a task can never run while a render borrows
//! the same scene.

use std::time::{Duration, Instant};

use crate::error::ScheduleError;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

type Task = Box<dyn FnMut(&mut Scene)>;

struct Scheduled {
    id: TaskId,
    description: String,
    interval: Duration,
    last_run: Option<Instant>,
    task: Task,
}

#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<Scheduled>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` to run every `interval`. It first runs on the next poll.
    pub fn add<F>(
        &mut self,
        description: impl Into<String>,
        interval: Duration,
        task: F,
    ) -> Result<TaskId, ScheduleError>
    where
        F: FnMut(&mut Scene) + 'static,
    {
        if interval.is_zero() {
            return Err(ScheduleError::ZeroInterval);
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        let description = description.into();
        log::debug!("Added timer task: {description}");
        self.tasks.push(Scheduled {
            id,
            description,
            interval,
            last_run: None,
            task: Box::new(task),
        });
        Ok(id)
    }

    /// Returns false if `id` was not registered.
    pub fn remove(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                let removed = self.tasks.remove(index);
                log::debug!("Removed timer task: {}", removed.description);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every task whose interval has strictly elapsed since its last
    /// run, in registration order. Returns how many ran.
    pub fn poll(&mut self, now: Instant, scene: &mut Scene) -> usize {
        let mut ran = 0;
        for scheduled in &mut self.tasks {
            let due = match scheduled.last_run {
                Some(last) => now.saturating_duration_since(last) > scheduled.interval,
                None => true,
            };
            if due {
                (scheduled.task)(scene);
                scheduled.last_run = Some(now);
                ran += 1;
            }
        }
        ran
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field(
                "tasks",
                &self.tasks.iter().map(|t| &t.description).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut Scene) + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move |_: &mut Scene| handle.set(handle.get() + 1))
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut scheduler = Scheduler::new();
        let result = scheduler.add("never", Duration::ZERO, |_: &mut Scene| {});
        assert_eq!(result.err(), Some(ScheduleError::ZeroInterval));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn runs_immediately_then_after_interval() {
        let mut scheduler = Scheduler::new();
        let mut scene = Scene::new();
        let (count, task) = counter();
        scheduler.add("tick", Duration::from_millis(10), task).unwrap();

        let start = Instant::now();
        assert_eq!(scheduler.poll(start, &mut scene), 1);
        assert_eq!(scheduler.poll(start + Duration::from_millis(5), &mut scene), 0);
        // Exactly one interval is not enough.
        assert_eq!(scheduler.poll(start + Duration::from_millis(10), &mut scene), 0);
        assert_eq!(scheduler.poll(start + Duration::from_millis(11), &mut scene), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn removed_task_stops_running() {
        let mut scheduler = Scheduler::new();
        let mut scene = Scene::new();
        let (count, task) = counter();
        let id = scheduler.add("tick", Duration::from_millis(1), task).unwrap();

        assert!(scheduler.remove(id));
        assert!(!scheduler.remove(id));
        scheduler.poll(Instant::now(), &mut scene);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn tasks_mutate_the_scene() {
        let mut scheduler = Scheduler::new();
        let mut scene = Scene::new();
        scheduler
            .add("grow", Duration::from_millis(1), |scene: &mut Scene| {
                scene.insert_group();
            })
            .unwrap();

        let start = Instant::now();
        scheduler.poll(start, &mut scene);
        scheduler.poll(start + Duration::from_millis(2), &mut scene);
        assert_eq!(scene.len(), 2);
    }
}
