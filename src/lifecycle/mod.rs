// ABOUTME: The container lifecycle controller: start, stop, restart, watch.
// ABOUTME: Composes the task graph, output prefixer, and restart policy.

mod error;
mod restart;

pub use error::LifecycleError;
pub use restart::{MAX_RESTART_ATTEMPTS, RestartDecision, RestartPolicy};

use crate::config::EnvSource;
use crate::graph::{TaskGraph, TaskResults};
use crate::network::NetworkAttach;
use crate::output::OutputPrefixer;
use crate::runtime::{CreateOptions, PortBinding, Runtime};
use crate::types::{ContainerId, ContainerIdentity, ContainerKind, ImageRef};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{debug, error, info, warn};

/// Container port the router terminates TLS on; the public port binds
/// to it.
pub const ROUTER_TLS_PORT: u16 = 443;
/// Plain-HTTP port the router also exposes.
pub const ROUTER_HTTP_PORT: u16 = 80;

const REMOVE_EXISTING: &str = "remove-existing";
const INSPECT_IMAGE: &str = "inspect-image";
const CONTAINER: &str = "container";
const NETWORK: &str = "network";
const OUTPUT: &str = "output";
const START: &str = "start";
const WATCH: &str = "watch";

/// Result carried between tasks of one start cycle.
#[derive(Debug, Clone)]
enum StepOutput {
    Done,
    Created(ContainerId),
}

impl StepOutput {
    fn container(&self) -> Option<&ContainerId> {
        match self {
            StepOutput::Created(id) => Some(id),
            StepOutput::Done => None,
        }
    }
}

fn created_container(results: &TaskResults<StepOutput>) -> ContainerId {
    results
        .get(CONTAINER)
        .and_then(StepOutput::container)
        .expect("container task completes before its dependents")
        .clone()
}

/// Controller for one logical container.
///
/// Owns the container's identity and lifecycle state. `start` runs the
/// dependency-ordered setup graph; an exit watcher feeds unexpected
/// terminations back into the bounded restart policy.
pub struct Container {
    identity: ContainerIdentity,
    image: ImageRef,
    /// Host port published to the router's TLS port. Ignored for other
    /// kinds.
    public_port: u16,
    runtime: Arc<dyn Runtime>,
    network: Arc<dyn NetworkAttach>,
    env: Arc<dyn EnvSource>,
    policy: RestartPolicy,
    /// Intent: true between start() and stop(). Disambiguates expected
    /// from unexpected exits.
    desired_running: AtomicBool,
    /// Restart triggers seen so far. Monotonic; never resets for the
    /// lifetime of the controller.
    restart_attempts: AtomicU32,
    /// Runtime instance created by the most recent start cycle.
    current: Mutex<Option<ContainerId>>,
    /// Serializes start cycles; start() is not reentrant.
    start_gate: tokio::sync::Mutex<()>,
}

impl Container {
    pub fn new(
        identity: ContainerIdentity,
        image: ImageRef,
        public_port: u16,
        runtime: Arc<dyn Runtime>,
        network: Arc<dyn NetworkAttach>,
        env: Arc<dyn EnvSource>,
    ) -> Arc<Self> {
        Arc::new(Self {
            identity,
            image,
            public_port,
            runtime,
            network,
            env,
            policy: RestartPolicy::default(),
            desired_running: AtomicBool::new(false),
            restart_attempts: AtomicU32::new(0),
            current: Mutex::new(None),
            start_gate: tokio::sync::Mutex::new(()),
        })
    }

    pub fn identity(&self) -> &ContainerIdentity {
        &self.identity
    }

    pub fn desired_running(&self) -> bool {
        self.desired_running.load(Ordering::SeqCst)
    }

    pub fn restart_attempts(&self) -> u32 {
        self.restart_attempts.load(Ordering::SeqCst)
    }

    /// Id of the container created by the most recent start cycle.
    pub fn current_container(&self) -> Option<ContainerId> {
        self.current.lock().clone()
    }

    /// Bring the container up: remove leftovers, ensure the image,
    /// create, attach network and output, start, and watch for exit.
    ///
    /// On failure the failing task's error propagates and completed
    /// steps are left as-is; the next start cycle reconciles them.
    pub async fn start(self: &Arc<Self>) -> Result<(), LifecycleError> {
        let _gate = self.start_gate.lock().await;
        self.desired_running.store(true, Ordering::SeqCst);

        let mut graph: TaskGraph<StepOutput, LifecycleError> = TaskGraph::new();

        let this = Arc::clone(self);
        graph.add(REMOVE_EXISTING, &[], move |_| async move {
            this.remove_existing().await
        });

        let this = Arc::clone(self);
        graph.add(INSPECT_IMAGE, &[], move |_| async move {
            this.ensure_image().await
        });

        let this = Arc::clone(self);
        graph.add(
            CONTAINER,
            &[INSPECT_IMAGE, REMOVE_EXISTING],
            move |_| async move { this.create().await },
        );

        let this = Arc::clone(self);
        graph.add(NETWORK, &[CONTAINER], move |_| async move {
            this.network
                .attach_container(this.identity.runtime_name())
                .await?;
            Ok(StepOutput::Done)
        });

        let this = Arc::clone(self);
        graph.add(OUTPUT, &[CONTAINER], move |results| async move {
            this.attach_output(&created_container(&results)).await
        });

        let this = Arc::clone(self);
        graph.add(START, &[NETWORK, OUTPUT], move |results| async move {
            info!(
                "Starting '{}' {} container",
                this.identity.friendly_name(),
                this.identity.kind()
            );
            this.runtime
                .start_container(&created_container(&results))
                .await?;
            Ok(StepOutput::Done)
        });

        let this = Arc::clone(self);
        graph.add(WATCH, &[START], move |results| async move {
            this.watch_for_exit(created_container(&results));
            Ok(StepOutput::Done)
        });

        graph.run().await?;
        Ok(())
    }

    /// Take the container down and keep it down: restart is suppressed
    /// until the next start().
    pub async fn stop(&self) -> Result<(), LifecycleError> {
        // Flip intent before touching the runtime so a concurrent exit
        // notification cannot race into a restart.
        self.desired_running.store(false, Ordering::SeqCst);

        self.runtime
            .remove_container(self.identity.runtime_name(), true)
            .await?;

        info!(
            "Stopped {} '{}' container",
            self.identity.kind(),
            self.identity.friendly_name()
        );
        Ok(())
    }

    /// Trigger another start cycle, bounded by the restart policy.
    ///
    /// Fire-and-forget: the start runs in the background and its
    /// failures are logged, not returned. Past the attempt ceiling this
    /// is a silent no-op.
    pub fn restart(self: &Arc<Self>) {
        let attempt = self.restart_attempts.fetch_add(1, Ordering::SeqCst) + 1;

        match self.policy.decide(self.desired_running(), attempt) {
            RestartDecision::GiveUp => {}
            RestartDecision::Restart => {
                info!(
                    "Restarting {} '{}' container attempt #{}",
                    self.identity.kind(),
                    self.identity.friendly_name(),
                    attempt
                );
                let this = Arc::clone(self);
                tokio::spawn(async move {
                    if let Err(e) = this.start().await {
                        warn!(
                            "Unable to restart {} '{}' container: {e}",
                            this.identity.kind(),
                            this.identity.friendly_name()
                        );
                    }
                });
            }
        }
    }

    // =========================================================================
    // Start-cycle tasks
    // =========================================================================

    async fn remove_existing(&self) -> Result<StepOutput, LifecycleError> {
        let name = self.identity.runtime_name();
        match self.runtime.inspect_container(name).await {
            Ok(_) => {
                self.runtime.remove_container(name, true).await?;
            }
            // Nothing to remove.
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Ok(StepOutput::Done)
    }

    async fn ensure_image(&self) -> Result<StepOutput, LifecycleError> {
        let present = self
            .runtime
            .image_exists(&self.image)
            .await
            .map_err(LifecycleError::Image)?;

        if !present {
            self.pull_image().await?;
        }
        Ok(StepOutput::Done)
    }

    async fn pull_image(&self) -> Result<(), LifecycleError> {
        info!("Pulling container image '{}'", self.image);
        match self.runtime.pull_image(&self.image).await {
            Ok(()) => {
                info!("Completed pull of container image '{}'", self.image);
                Ok(())
            }
            Err(e) => {
                error!("Error pulling container image {}", self.image);
                Err(LifecycleError::ImagePull(e))
            }
        }
    }

    async fn create(&self) -> Result<StepOutput, LifecycleError> {
        let options = self.create_options();
        let id = self.runtime.create_container(&options).await?;
        *self.current.lock() = Some(id.clone());
        Ok(StepOutput::Created(id))
    }

    fn create_options(&self) -> CreateOptions {
        let env: Vec<String> = self
            .env
            .environment()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        let mut options = CreateOptions {
            name: self.identity.runtime_name().to_string(),
            hostname: self.identity.runtime_name().to_string(),
            image: self.image.clone(),
            env,
            attach_stdout: true,
            attach_stderr: true,
            port_bindings: Vec::new(),
            exposed_ports: Vec::new(),
        };

        if self.identity.kind() == ContainerKind::Router {
            options.port_bindings.push(PortBinding {
                host_port: self.public_port,
                container_port: ROUTER_TLS_PORT,
            });
            options.exposed_ports = vec![
                format!("{ROUTER_TLS_PORT}/tcp"),
                format!("{ROUTER_HTTP_PORT}/tcp"),
            ];
        }

        options
    }

    async fn attach_output(&self, id: &ContainerId) -> Result<StepOutput, LifecycleError> {
        // Resources produce no attributable output.
        if self.identity.kind() == ContainerKind::Resource {
            return Ok(StepOutput::Done);
        }

        let stream = self.runtime.attach_output(id).await?;
        debug!("attached to '{}' output", self.identity.friendly_name());

        let prefixer = OutputPrefixer::new(&self.identity);
        tokio::spawn(prefixer.pump(stream));

        Ok(StepOutput::Done)
    }

    /// Register the exit watcher. Returns immediately; the wait itself
    /// runs in the background until the runtime reports the container
    /// stopped.
    fn watch_for_exit(self: &Arc<Self>, id: ContainerId) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let status = match this.runtime.wait_container(&id).await {
                Ok(code) => code,
                Err(e) => {
                    warn!(
                        "exit watch for '{}' failed: {e}",
                        this.identity.friendly_name()
                    );
                    return;
                }
            };

            if !this.desired_running() {
                // Intentional stop; stop() already said so.
                return;
            }

            warn!(
                "{} container '{}' exited with status code {}",
                this.identity.kind().capitalized(),
                this.identity.friendly_name(),
                status
            );
            this.restart();
        });
    }
}
