use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use kube::error::ErrorResponse;
use kube::{Resource, ResourceExt};

use super::{DeploymentConfigClient, ResourceClient};
use crate::error::ClientError;
use crate::resources::{DeploymentConfig, DeploymentConfigStatus, RolloutRequest};

/// Verb recorded in the call journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Create,
    Update,
    Delete,
    Instantiate,
}

/// One call observed by a [`MemoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get {
        namespace: String,
        name: String,
    },
    Create {
        namespace: String,
        name: String,
    },
    Update {
        namespace: String,
        name: String,
        resource_version: Option<String>,
    },
    Delete {
        namespace: String,
        name: String,
    },
    Instantiate {
        namespace: String,
        name: String,
        request: RolloutRequest,
    },
}

impl Call {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Get { .. } => Verb::Get,
            Self::Create { .. } => Verb::Create,
            Self::Update { .. } => Verb::Update,
            Self::Delete { .. } => Verb::Delete,
            Self::Instantiate { .. } => Verb::Instantiate,
        }
    }
}

struct Injected {
    code: u16,
    message: String,
}

struct State<K> {
    objects: BTreeMap<(String, String), K>,
    next_version: u64,
    calls: Vec<Call>,
    failures: HashMap<Verb, Injected>,
}

impl<K> State<K> {
    fn bump_version(&mut self) -> String {
        self.next_version += 1;
        self.next_version.to_string()
    }

    fn record(&mut self, call: Call) -> Result<(), ClientError> {
        let verb = call.verb();
        self.calls.push(call);
        match self.failures.get(&verb) {
            Some(injected) => Err(api_error(injected.code, &injected.message)),
            None => Ok(()),
        }
    }
}

fn api_error(code: u16, message: &str) -> ClientError {
    ClientError::from(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: String::new(),
        code,
    }))
}

/// Cluster-scoped kinds are stored under the empty namespace.
fn scoped(namespace: &str) -> Option<String> {
    (!namespace.is_empty()).then(|| namespace.to_string())
}

fn key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_string(), name.to_string())
}

/// In-process [`ResourceClient`] that behaves like a single API server.
///
/// Every write assigns a fresh resource version and updates carrying a stale
/// version are rejected, so optimistic-concurrency behavior can be exercised
/// without a cluster. All calls are journaled, and any verb can be made to
/// fail with a chosen status code.
pub struct MemoryClient<K> {
    state: Mutex<State<K>>,
}

impl<K> Default for MemoryClient<K> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                objects: BTreeMap::new(),
                next_version: 0,
                calls: Vec::new(),
                failures: HashMap::new(),
            }),
        }
    }
}

impl<K> MemoryClient<K>
where
    K: Resource + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State<K>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a document directly, bypassing the journal. Returns the stored
    /// copy with its assigned resource version.
    pub fn insert(&self, namespace: &str, mut resource: K) -> K {
        let mut state = self.lock();
        let meta = resource.meta_mut();
        meta.namespace = scoped(namespace);
        meta.resource_version = Some(state.bump_version());
        state
            .objects
            .insert(key(namespace, &resource.name_any()), resource.clone());
        resource
    }

    /// Current stored copy of a document.
    pub fn object(&self, namespace: &str, name: &str) -> Option<K> {
        self.lock().objects.get(&key(namespace, name)).cloned()
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls observed for `verb`, including failed ones.
    pub fn count(&self, verb: Verb) -> usize {
        self.lock().calls.iter().filter(|c| c.verb() == verb).count()
    }

    /// Make every subsequent call of `verb` fail with the given API status.
    pub fn fail_on(&self, verb: Verb, code: u16, message: impl Into<String>) {
        self.lock().failures.insert(
            verb,
            Injected {
                code,
                message: message.into(),
            },
        );
    }

    pub fn clear_failure(&self, verb: Verb) {
        self.lock().failures.remove(&verb);
    }
}

#[async_trait]
impl<K> ResourceClient<K> for MemoryClient<K>
where
    K: Resource + Clone + Send + Sync,
{
    async fn get(&self, namespace: &str, name: &str) -> Result<K, ClientError> {
        let mut state = self.lock();
        state.record(Call::Get {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        state
            .objects
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("{namespace}/{name}")))
    }

    async fn create(&self, namespace: &str, resource: &K) -> Result<K, ClientError> {
        let name = resource.meta().name.clone().unwrap_or_default();
        let mut state = self.lock();
        state.record(Call::Create {
            namespace: namespace.to_string(),
            name: name.clone(),
        })?;
        if name.is_empty() {
            return Err(api_error(422, "metadata.name: Required value"));
        }
        if state.objects.contains_key(&key(namespace, &name)) {
            return Err(ClientError::Conflict(format!(
                "{namespace}/{name} already exists"
            )));
        }

        let mut stored = resource.clone();
        let version = state.bump_version();
        let meta = stored.meta_mut();
        meta.namespace = scoped(namespace);
        meta.resource_version = Some(version);
        state.objects.insert(key(namespace, &name), stored.clone());
        Ok(stored)
    }

    async fn update(&self, namespace: &str, resource: &K) -> Result<K, ClientError> {
        let name = resource.name_any();
        let offered = resource.resource_version();
        let mut state = self.lock();
        state.record(Call::Update {
            namespace: namespace.to_string(),
            name: name.clone(),
            resource_version: offered.clone(),
        })?;

        let current = state
            .objects
            .get(&key(namespace, &name))
            .ok_or_else(|| ClientError::NotFound(format!("{namespace}/{name}")))?;
        if let Some(offered) = offered.filter(|v| !v.is_empty()) {
            if current.resource_version().as_deref() != Some(offered.as_str()) {
                return Err(ClientError::Conflict(format!(
                    "{namespace}/{name}: the object has been modified"
                )));
            }
        }

        let mut stored = resource.clone();
        let version = state.bump_version();
        let meta = stored.meta_mut();
        meta.namespace = scoped(namespace);
        meta.resource_version = Some(version);
        state.objects.insert(key(namespace, &name), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.record(Call::Delete {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        state
            .objects
            .remove(&key(namespace, name))
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(format!("{namespace}/{name}")))
    }
}

#[async_trait]
impl DeploymentConfigClient for MemoryClient<DeploymentConfig> {
    async fn instantiate(
        &self,
        namespace: &str,
        name: &str,
        request: &RolloutRequest,
    ) -> Result<DeploymentConfig, ClientError> {
        let mut state = self.lock();
        state.record(Call::Instantiate {
            namespace: namespace.to_string(),
            name: name.to_string(),
            request: request.clone(),
        })?;

        let version = state.bump_version();
        let stored = state
            .objects
            .get_mut(&key(namespace, name))
            .ok_or_else(|| ClientError::NotFound(format!("{namespace}/{name}")))?;
        let status = stored
            .status
            .get_or_insert_with(DeploymentConfigStatus::default);
        status.latest_version += 1;
        stored.metadata.resource_version = Some(version);
        Ok(stored.clone())
    }
}
