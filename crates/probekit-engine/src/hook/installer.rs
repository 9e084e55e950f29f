//! Hook installation
//!
//! Turns [`HookSpec`]s into live intercepts through an [`Interceptor`]
//! host and hands back an [`Unhook`] per intercept.

use std::fmt;

use probekit_types::Member;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::spec::{HookSpec, InterceptCallbacks};
use crate::config::ProbeConfig;
use crate::error::{BulkFailure, BulkInstallError, InstallationError};

/// Removes one intercept from the host
pub trait UndoHandle: Send {
    /// Remove the intercept
    fn revert(self: Box<Self>);
}

/// Host capability that registers intercepts on members
pub trait Interceptor {
    /// Register `callbacks` on `target`
    ///
    /// Every call produces a new, independent intercept, even for a member
    /// that is already intercepted.
    fn install_intercept(
        &self,
        target: &Member,
        callbacks: InterceptCallbacks,
    ) -> Result<Box<dyn UndoHandle>, InstallationError>;
}

impl<T: Interceptor + ?Sized> Interceptor for &T {
    fn install_intercept(
        &self,
        target: &Member,
        callbacks: InterceptCallbacks,
    ) -> Result<Box<dyn UndoHandle>, InstallationError> {
        (**self).install_intercept(target, callbacks)
    }
}

/// Handle to one installed intercept
///
/// Reverting consumes the handle, so an intercept is removed at most once.
/// Dropping the handle leaves the intercept installed.
pub struct Unhook {
    member: Member,
    handle: Box<dyn UndoHandle>,
}

impl Unhook {
    /// Wrap a host undo handle
    pub fn new(member: Member, handle: Box<dyn UndoHandle>) -> Self {
        Self { member, handle }
    }

    /// Member this intercept is installed on
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Remove the intercept
    pub fn revert(self) {
        debug!(member = %self.member, "Reverting intercept");
        self.handle.revert();
    }
}

impl fmt::Debug for Unhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unhook")
            .field("member", &self.member.to_string())
            .finish_non_exhaustive()
    }
}

/// What a bulk installation does with its successes when a member fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkFailurePolicy {
    /// Revert every intercept installed by the call
    #[default]
    Rollback,
    /// Leave successful intercepts installed and return them in the error
    KeepInstalled,
}

/// Installs hooks through an [`Interceptor`]
pub struct HookInstaller<'a, I: Interceptor + ?Sized> {
    interceptor: &'a I,
    policy: BulkFailurePolicy,
}

impl<'a, I: Interceptor + ?Sized> HookInstaller<'a, I> {
    /// Create an installer with the default bulk failure policy
    pub fn new(interceptor: &'a I) -> Self {
        Self {
            interceptor,
            policy: BulkFailurePolicy::default(),
        }
    }

    /// Create an installer using the configured bulk failure policy
    pub fn from_config(interceptor: &'a I, config: &ProbeConfig) -> Self {
        Self::new(interceptor).with_policy(config.hooks.on_bulk_failure)
    }

    /// Set the bulk failure policy
    pub fn with_policy(mut self, policy: BulkFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current bulk failure policy
    pub fn policy(&self) -> BulkFailurePolicy {
        self.policy
    }

    /// Configure a hook on `target` with `block` and install it
    ///
    /// Host errors are returned unchanged.
    pub fn install<F>(
        &self,
        target: impl Into<Member>,
        block: F,
    ) -> Result<Unhook, InstallationError>
    where
        F: FnOnce(&mut HookSpec),
    {
        let mut spec = HookSpec::new(target);
        block(&mut spec);
        self.install_spec(spec)
    }

    /// Install an already configured spec
    pub fn install_spec(&self, spec: HookSpec) -> Result<Unhook, InstallationError> {
        if !spec.is_configured() {
            debug!(member = %spec.target(), "Installing hook with no callbacks");
        }
        let (member, callbacks) = spec.into_parts();
        let handle = self.interceptor.install_intercept(&member, callbacks)?;
        debug!(member = %member, "Installed intercept");
        Ok(Unhook::new(member, handle))
    }

    /// Apply the same `block` to every target and install each hook
    ///
    /// Every target is attempted. On success the handles come back in input
    /// order. If any target fails, the intercepts that did install are
    /// reverted or returned inside the error, depending on the policy.
    pub fn install_all<M, T, F>(
        &self,
        targets: T,
        block: F,
    ) -> Result<Vec<Unhook>, BulkInstallError>
    where
        T: IntoIterator<Item = M>,
        M: Into<Member>,
        F: Fn(&mut HookSpec),
    {
        let mut installed = Vec::new();
        let mut failures = Vec::new();
        let mut total = 0;

        for (index, target) in targets.into_iter().enumerate() {
            total += 1;
            match self.install(target, &block) {
                Ok(unhook) => installed.push(unhook),
                Err(error) => {
                    warn!(index, %error, "Hook installation failed");
                    failures.push(BulkFailure { index, error });
                }
            }
        }

        if failures.is_empty() {
            return Ok(installed);
        }

        let installed = match self.policy {
            BulkFailurePolicy::Rollback => {
                warn!(
                    failed = failures.len(),
                    total,
                    reverting = installed.len(),
                    "Bulk hook installation failed, rolling back"
                );
                for unhook in installed.into_iter().rev() {
                    unhook.revert();
                }
                Vec::new()
            }
            BulkFailurePolicy::KeepInstalled => {
                warn!(
                    failed = failures.len(),
                    total,
                    kept = installed.len(),
                    "Bulk hook installation failed, keeping installed intercepts"
                );
                installed
            }
        };

        Err(BulkInstallError {
            total,
            failures,
            installed,
        })
    }
}

/// Install one hook with the default policy
pub fn create_hook<I, F>(
    interceptor: &I,
    target: impl Into<Member>,
    block: F,
) -> Result<Unhook, InstallationError>
where
    I: Interceptor + ?Sized,
    F: FnOnce(&mut HookSpec),
{
    HookInstaller::new(interceptor).install(target, block)
}

/// Install the same hook on every target with the default policy
pub fn create_hooks<I, M, T, F>(
    interceptor: &I,
    targets: T,
    block: F,
) -> Result<Vec<Unhook>, BulkInstallError>
where
    I: Interceptor + ?Sized,
    T: IntoIterator<Item = M>,
    M: Into<Member>,
    F: Fn(&mut HookSpec),
{
    HookInstaller::new(interceptor).install_all(targets, block)
}
