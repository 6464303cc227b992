use std::pin::Pin;
use std::time::Duration;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio::time;
use tracing::debug;
use tracing::info;
use trigger::FixedRateTrigger;

use crate::exception::CoreRsResult;
use crate::log;

mod trigger;

pub struct JobContext {
    pub name: &'static str,
    pub scheduled_time: DateTime<Utc>,
}

trait Job<S>: Send {
    fn execute(&self, state: S, context: JobContext) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

impl<F, Fut, S> Job<S> for F
where
    F: Fn(S, JobContext) -> Fut + Send,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn execute(&self, state: S, context: JobContext) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(self(state, context))
    }
}

trait Trigger: Send {
    fn next(&self, previous: DateTime<Utc>) -> DateTime<Utc>;
}

struct Schedule<S> {
    name: &'static str,
    job: Box<dyn Job<S>>,
    trigger: Box<dyn Trigger>,
}

/// Runs jobs on their triggers until shutdown.
///
/// An execution is awaited before the next one is scheduled, so one job never overlaps with
/// itself. When a run takes longer than its interval the next run starts right after it.
pub struct Scheduler<S> {
    schedules: Vec<Schedule<S>>,
}

impl<S> Scheduler<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { schedules: Vec::new() }
    }

    pub fn schedule_fixed_rate<J, Fut>(&mut self, name: &'static str, job: J, interval: Duration)
    where
        J: Fn(S, JobContext) -> Fut + Copy + Send + 'static,
        Fut: Future<Output = CoreRsResult<()>> + Send + 'static,
    {
        let trigger = Box::new(FixedRateTrigger { interval });
        let job = move |state: S, context| process_job(job, state, context);
        self.schedules.push(Schedule {
            name,
            job: Box::new(job),
            trigger,
        });
    }

    pub async fn start(self, state: S, shutdown_signal: broadcast::Receiver<()>) -> CoreRsResult<()> {
        let mut handles = JoinSet::new();
        for schedule in self.schedules {
            let state = state.clone();
            let mut shutdown_signal = shutdown_signal.resubscribe();
            handles.spawn(async move {
                let mut previous = Utc::now();
                loop {
                    let context = JobContext {
                        name: schedule.name,
                        scheduled_time: schedule.trigger.next(previous),
                    };
                    info!(
                        name = context.name,
                        scheduled_time = context.scheduled_time.to_rfc3339_opts(SecondsFormat::Millis, true),
                        "scheduled job"
                    );
                    let waiting_time = (context.scheduled_time - Utc::now()).to_std().unwrap_or_default();
                    previous = context.scheduled_time;
                    tokio::select! {
                        _ = shutdown_signal.recv() => {
                            return;
                        }
                        () = time::sleep(waiting_time) => {
                            schedule.job.execute(state.clone(), context).await;
                            previous = previous.max(Utc::now());
                        }
                    }
                }
            });
        }
        info!("scheduler started");
        while let Some(result) = handles.join_next().await {
            result?;
        }
        info!("scheduler stopped");
        Ok(())
    }
}

impl<S> Default for Scheduler<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

async fn process_job<S, J, Fut>(job: J, state: S, context: JobContext)
where
    J: Fn(S, JobContext) -> Fut,
    Fut: Future<Output = CoreRsResult<()>>,
{
    log::start_action("job", None, async move {
        let name = context.name;
        let scheduled_time = context.scheduled_time.to_rfc3339_opts(SecondsFormat::Millis, true);
        debug!(name, "[job]");
        debug!(scheduled_time, "[job]");
        job(state, context).await
    })
    .await;
}
