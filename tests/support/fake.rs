// ABOUTME: In-memory fake runtime and network for lifecycle tests.
// ABOUTME: Records every call and lets tests script exits and failures.

use async_trait::async_trait;
use localdev::network::{NetworkAttach, NetworkError};
use localdev::runtime::{
    AttachError, AttachOps, ContainerError, ContainerOps, ContainerState, ContainerSummary,
    CreateOptions, ImageError, ImageOps, OutputStream,
};
use localdev::types::{ContainerId, ImageRef};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::{Notify, oneshot};

/// Fake container runtime backed by a shared call log.
///
/// Every operation appends a `"verb argument"` entry to the log, so
/// tests can assert both which operations ran and in what order. Exits
/// are scripted: `wait_container` parks on a channel until the test
/// fires `send_exit`.
pub struct FakeRuntime {
    log: Arc<Mutex<Vec<String>>>,
    container_exists: AtomicBool,
    image_present: AtomicBool,
    fail_create: AtomicBool,
    fail_pull: AtomicBool,
    park_create: AtomicBool,
    create_release: Notify,
    created: Mutex<Vec<CreateOptions>>,
    waiters: Mutex<Vec<oneshot::Sender<i64>>>,
    next_id: AtomicU32,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            container_exists: AtomicBool::new(false),
            image_present: AtomicBool::new(true),
            fail_create: AtomicBool::new(false),
            fail_pull: AtomicBool::new(false),
            park_create: AtomicBool::new(false),
            create_release: Notify::new(),
            created: Mutex::new(Vec::new()),
            waiters: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Pretend a container with the supervised name already exists.
    pub fn set_container_exists(&self, exists: bool) {
        self.container_exists.store(exists, Ordering::SeqCst);
    }

    /// Pretend the image is (or is not) in the local image store.
    pub fn set_image_present(&self, present: bool) {
        self.image_present.store(present, Ordering::SeqCst);
    }

    /// Make the next create_container calls fail.
    pub fn fail_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    /// Make the next pull_image calls fail.
    pub fn fail_pull(&self) {
        self.fail_pull.store(true, Ordering::SeqCst);
    }

    /// Park create_container calls after logging, until released. Lets
    /// tests hold a start cycle mid-graph.
    pub fn set_park_create(&self, park: bool) {
        self.park_create.store(park, Ordering::SeqCst);
    }

    /// Let one parked create_container call proceed.
    pub fn release_create(&self) {
        self.create_release.notify_one();
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Share the call log with another fake, merging their histories.
    pub fn shared_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }

    /// Options of every create_container call, in order.
    pub fn created_options(&self) -> Vec<CreateOptions> {
        self.created.lock().clone()
    }

    /// Number of exit watchers currently parked in wait_container.
    pub fn waiter_count(&self) -> usize {
        self.waiters.lock().len()
    }

    /// Complete the oldest parked wait_container call with `code`.
    pub fn send_exit(&self, code: i64) {
        let sender = self.waiters.lock().remove(0);
        sender.send(code).ok();
    }

    pub fn count(&self, verb: &str) -> usize {
        let prefix = format!("{verb} ");
        self.log
            .lock()
            .iter()
            .filter(|entry| entry.starts_with(&prefix))
            .count()
    }

    /// Index of the first log entry starting with `verb`.
    pub fn first_index(&self, verb: &str) -> Option<usize> {
        self.indices(verb).first().copied()
    }

    /// Indices of every log entry starting with `verb`, in order.
    pub fn indices(&self, verb: &str) -> Vec<usize> {
        let prefix = format!("{verb} ");
        self.log
            .lock()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.starts_with(&prefix))
            .map(|(i, _)| i)
            .collect()
    }

    fn record(&self, entry: String) {
        self.log.lock().push(entry);
    }
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn inspect_container(&self, name: &str) -> Result<ContainerSummary, ContainerError> {
        self.record(format!("inspect {name}"));
        if self.container_exists.load(Ordering::SeqCst) {
            Ok(ContainerSummary {
                id: ContainerId::new("existing".to_string()),
                name: name.to_string(),
                state: ContainerState::Running,
            })
        } else {
            Err(ContainerError::NotFound(name.to_string()))
        }
    }

    async fn remove_container(&self, name: &str, force: bool) -> Result<(), ContainerError> {
        self.record(format!("remove {name} force={force}"));
        self.container_exists.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn create_container(
        &self,
        options: &CreateOptions,
    ) -> Result<ContainerId, ContainerError> {
        self.record(format!("create {}", options.name));
        if self.park_create.load(Ordering::SeqCst) {
            self.create_release.notified().await;
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ContainerError::Runtime("injected create failure".into()));
        }
        self.created.lock().push(options.clone());
        self.container_exists.store(true, Ordering::SeqCst);
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ContainerId::new(format!("ctr-{n}")))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.record(format!("start {id}"));
        Ok(())
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, ContainerError> {
        self.record(format!("wait {id}"));
        let (tx, rx) = oneshot::channel();
        self.waiters.lock().push(tx);
        rx.await
            .map_err(|_| ContainerError::Runtime("wait channel closed".into()))
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError> {
        self.record(format!("image_exists {reference}"));
        Ok(self.image_present.load(Ordering::SeqCst))
    }

    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        self.record(format!("pull {reference}"));
        if self.fail_pull.load(Ordering::SeqCst) {
            return Err(ImageError::PullFailed("injected pull failure".into()));
        }
        self.image_present.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl AttachOps for FakeRuntime {
    async fn attach_output(&self, id: &ContainerId) -> Result<OutputStream, AttachError> {
        self.record(format!("attach {id}"));
        Ok(Box::pin(futures::stream::empty()))
    }
}

/// Fake network that records attachments into the runtime's log.
pub struct FakeNetwork {
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeNetwork {
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log }
    }
}

#[async_trait]
impl NetworkAttach for FakeNetwork {
    async fn attach_container(&self, runtime_name: &str) -> Result<(), NetworkError> {
        self.log.lock().push(format!("network {runtime_name}"));
        Ok(())
    }
}
