// ABOUTME: Reusable dependency-ordered task graph executor.
// ABOUTME: Runs independent tasks concurrently and fails fast on first error.

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashMap;
use thiserror::Error;

/// Structural problems with a graph, distinct from task failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate task: {0}")]
    DuplicateTask(&'static str),

    #[error("task `{task}` depends on unknown task `{dep}`")]
    UnknownDependency {
        task: &'static str,
        dep: &'static str,
    },

    #[error("dependency cycle among tasks: {0:?}")]
    Cycle(Vec<&'static str>),
}

/// Results of completed tasks, keyed by task name. Actions receive a
/// snapshot containing every task completed so far, which by
/// construction includes all of their prerequisites.
#[derive(Debug, Clone)]
pub struct TaskResults<T> {
    inner: HashMap<&'static str, T>,
}

impl<T> TaskResults<T> {
    pub fn get(&self, name: &str) -> Option<&T> {
        self.inner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

type TaskAction<T, E> = Box<dyn FnOnce(TaskResults<T>) -> BoxFuture<'static, Result<T, E>> + Send>;

struct Task<T, E> {
    deps: Vec<&'static str>,
    action: TaskAction<T, E>,
}

/// A set of named tasks with declared prerequisites.
///
/// Each task runs exactly once, as soon as all of its prerequisites have
/// completed successfully. Independent tasks run concurrently. The first
/// task failure aborts the execution: tasks already in flight finish but
/// their results are discarded, and no new tasks start.
pub struct TaskGraph<T, E> {
    tasks: Vec<(&'static str, Task<T, E>)>,
}

impl<T, E> Default for TaskGraph<T, E>
where
    T: Clone + Send + 'static,
    E: From<GraphError> + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> TaskGraph<T, E>
where
    T: Clone + Send + 'static,
    E: From<GraphError> + Send + 'static,
{
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task. `deps` name tasks that must complete before `action`
    /// runs; the action receives the results collected so far.
    pub fn add<F, Fut>(&mut self, name: &'static str, deps: &[&'static str], action: F)
    where
        F: FnOnce(TaskResults<T>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.tasks.push((
            name,
            Task {
                deps: deps.to_vec(),
                action: Box::new(move |results| Box::pin(action(results))),
            },
        ));
    }

    fn validate(&self) -> Result<(), GraphError> {
        for (i, (name, task)) in self.tasks.iter().enumerate() {
            if self.tasks[..i].iter().any(|(other, _)| other == name) {
                return Err(GraphError::DuplicateTask(name));
            }
            for dep in &task.deps {
                if !self.tasks.iter().any(|(other, _)| other == dep) {
                    return Err(GraphError::UnknownDependency { task: name, dep });
                }
            }
        }
        Ok(())
    }

    /// Run the graph to completion, returning the collected results.
    pub async fn run(self) -> Result<TaskResults<T>, E> {
        self.validate()?;

        let mut pending: Vec<(&'static str, Task<T, E>)> = self.tasks;
        let mut completed: HashMap<&'static str, T> = HashMap::new();
        let mut in_flight = FuturesUnordered::new();

        loop {
            // Schedule every task whose prerequisites are all complete.
            let mut i = 0;
            while i < pending.len() {
                let ready = pending[i]
                    .1
                    .deps
                    .iter()
                    .all(|dep| completed.contains_key(dep));
                if ready {
                    let (name, task) = pending.remove(i);
                    let snapshot = TaskResults {
                        inner: completed.clone(),
                    };
                    in_flight.push(async move { (name, (task.action)(snapshot).await) });
                } else {
                    i += 1;
                }
            }

            if in_flight.is_empty() {
                if pending.is_empty() {
                    return Ok(TaskResults { inner: completed });
                }
                // Nothing runnable and nothing running: the remaining
                // tasks depend on each other.
                let stuck = pending.iter().map(|(name, _)| *name).collect();
                return Err(GraphError::Cycle(stuck).into());
            }

            let (name, result) = in_flight
                .next()
                .await
                .expect("in_flight checked non-empty above");

            match result {
                Ok(value) => {
                    completed.insert(name, value);
                }
                Err(e) => {
                    // Let tasks already in flight run out; their results
                    // are discarded along with the rest of the execution.
                    while in_flight.next().await.is_some() {}
                    return Err(e);
                }
            }
        }
    }
}
