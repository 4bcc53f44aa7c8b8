//! Calling-convention adapter shared by every driver operation.
//!
//! An operation runs as exactly one task, spawned on the ambient tokio runtime
//! as soon as the operation is invoked. The caller picks how to observe it:
//! `.await` the [`Completion`] (deferred value) or hand it a callback with
//! [`Completion::on_complete`]. Either way the outcome is delivered once.
//! Dropping a [`Completion`] detaches the task; it still runs to the end.

use std::fmt;
use std::future::Future;
use std::future::IntoFuture;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::Error;
use crate::Result;

/// Outcome of one driver operation, observable as a future or through a callback
#[must_use = "dropping a completion detaches the operation and discards its outcome"]
pub struct Completion<T> {
    state: State<T>,
}

enum State<T> {
    Running {
        runtime: Handle,
        task: JoinHandle<Result<T>>,
    },
    /// Rejected before any store call was issued
    Rejected(Error),
}

impl<T: Send + 'static> Completion<T> {
    /// Starts `fut` on the current tokio runtime.
    ///
    /// Without a runtime nothing is started and the completion is rejected
    /// with [`Error::NoRuntime`].
    pub(crate) fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        match Handle::try_current() {
            Ok(runtime) => {
                let task = runtime.spawn(fut);
                Self {
                    state: State::Running { runtime, task },
                }
            }
            Err(e) => Self::failed(Error::NoRuntime(e.to_string())),
        }
    }

    /// Already-settled failure
    pub fn failed(err: Error) -> Self {
        Self {
            state: State::Rejected(err),
        }
    }

    /// The error of a request rejected up front, without touching the store
    pub fn rejection(&self) -> Option<&Error> {
        match &self.state {
            State::Rejected(e) => Some(e),
            State::Running { .. } => None,
        }
    }

    /// Callback form: `callback` receives the outcome exactly once.
    ///
    /// A rejected request invokes the callback before this method returns and
    /// yields `None`. Otherwise the callback runs on the operation's runtime
    /// when it settles, and the returned handle resolves after the callback
    /// has run; a panic inside the callback surfaces through that handle.
    pub fn on_complete<F>(
        self,
        callback: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<T>) + Send + 'static,
    {
        match self.state {
            State::Rejected(e) => {
                callback(Err(e));
                None
            }
            State::Running { runtime, task } => Some(runtime.spawn(async move {
                callback(settle(task).await);
            })),
        }
    }
}

async fn settle<T>(task: JoinHandle<Result<T>>) -> Result<T> {
    task.await?
}

impl<T: Send + 'static> IntoFuture for Completion<T> {
    type Output = Result<T>;
    type IntoFuture = BoxFuture<'static, Result<T>>;

    fn into_future(self) -> Self::IntoFuture {
        match self.state {
            State::Running { task, .. } => settle(task).boxed(),
            State::Rejected(e) => futures::future::ready(Err(e)).boxed(),
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.state {
            State::Running { .. } => f.write_str("Completion::Running"),
            State::Rejected(e) => write!(f, "Completion::Rejected({e})"),
        }
    }
}
