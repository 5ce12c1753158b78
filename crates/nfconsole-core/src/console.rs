// ── Console ──
//
// Owns the API client and one manager per resource kind. `execute` routes
// a `Command` to the manager for its kind. The TUI runs the console as a
// task behind a `ConsoleHandle`; the CLI calls it directly.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use nfconsole_api::ApiClient;

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::kind::ResourceKind;
use crate::manager::Manager;
use crate::resource::{DeviceGroups, Gnbs, K4Keys, NetworkSlices, Resource, Subscribers, Upfs};
use crate::view::ListView;

const COMMAND_CHANNEL_SIZE: usize = 32;

#[derive(Debug)]
pub struct Console {
    api: ApiClient,
    device_groups: Manager<DeviceGroups>,
    network_slices: Manager<NetworkSlices>,
    gnbs: Manager<Gnbs>,
    upfs: Manager<Upfs>,
    k4_keys: Manager<K4Keys>,
    subscribers: Manager<Subscribers>,
}

impl Console {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            device_groups: Manager::new(),
            network_slices: Manager::new(),
            gnbs: Manager::new(),
            upfs: Manager::new(),
            k4_keys: Manager::new(),
            subscribers: Manager::new(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, CoreError> {
        Ok(Self::new(config.build_client()?))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Run one command against the manager of its kind.
    pub async fn execute(&mut self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(?cmd, "executing");
        let api = &self.api;
        match cmd.kind() {
            ResourceKind::DeviceGroup => dispatch(&mut self.device_groups, api, cmd).await,
            ResourceKind::NetworkSlice => dispatch(&mut self.network_slices, api, cmd).await,
            ResourceKind::Gnb => dispatch(&mut self.gnbs, api, cmd).await,
            ResourceKind::Upf => dispatch(&mut self.upfs, api, cmd).await,
            ResourceKind::K4Key => dispatch(&mut self.k4_keys, api, cmd).await,
            ResourceKind::Subscriber => dispatch(&mut self.subscribers, api, cmd).await,
        }
    }

    /// Current display of `kind` without fetching.
    pub fn view(&self, kind: ResourceKind) -> ListView {
        match kind {
            ResourceKind::DeviceGroup => self.device_groups.view(),
            ResourceKind::NetworkSlice => self.network_slices.view(),
            ResourceKind::Gnb => self.gnbs.view(),
            ResourceKind::Upf => self.upfs.view(),
            ResourceKind::K4Key => self.k4_keys.view(),
            ResourceKind::Subscriber => self.subscribers.view(),
        }
    }

    /// Move the console onto its own task and return a handle to it.
    ///
    /// The task ends when every handle has been dropped.
    pub fn spawn(self) -> ConsoleHandle {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        tokio::spawn(command_processor_task(self, rx));
        ConsoleHandle { command_tx: tx }
    }
}

/// Route a command to one manager.
async fn dispatch<R: Resource>(
    manager: &mut Manager<R>,
    api: &ApiClient,
    cmd: Command,
) -> Result<CommandResult, CoreError> {
    match cmd {
        Command::List(_) => Ok(CommandResult::List(manager.list(api).await)),
        Command::Fetch(_) => Ok(CommandResult::List(manager.fetch(api).await?)),
        Command::Get { key, .. } => {
            let (view, form) = manager.detail(api, &key).await?;
            Ok(CommandResult::Detail { view, form })
        }
        Command::Create { kind, form } => {
            let key = manager.create(api, &form).await?;
            Ok(CommandResult::Saved {
                kind,
                key,
                created: true,
                list: manager.view(),
            })
        }
        Command::Update { kind, key, form } => {
            manager.update(api, &key, &form).await?;
            Ok(CommandResult::Saved {
                kind,
                key,
                created: false,
                list: manager.view(),
            })
        }
        Command::Delete { kind, key } => {
            manager.delete(api, &key).await?;
            Ok(CommandResult::Deleted {
                kind,
                key,
                list: manager.view(),
            })
        }
        Command::Options(kind) => {
            let records = R::fetch_all(api).await?;
            let keys = records.iter().map(R::key).collect();
            manager.apply_list(Ok(records));
            Ok(CommandResult::Options { kind, keys })
        }
    }
}

async fn command_processor_task(mut console: Console, mut rx: mpsc::Receiver<CommandEnvelope>) {
    while let Some(envelope) = rx.recv().await {
        let result = console.execute(envelope.command).await;
        let _ = envelope.response_tx.send(result);
    }
    debug!("console task stopped");
}

// ── Handle ───────────────────────────────────────────────────────────

/// Cloneable sender side of a spawned console.
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    command_tx: mpsc::Sender<CommandEnvelope>,
}

impl ConsoleHandle {
    /// Send a command to the console task and await its result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::ConsoleClosed)?;
        rx.await.map_err(|_| CoreError::ConsoleClosed)?
    }
}
