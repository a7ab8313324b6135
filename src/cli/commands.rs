use crate::app::{AppContext, Result};
use crate::scheduler::{self, Scheduler};

pub async fn run(ctx: AppContext) -> Result<()> {
    Scheduler::new(ctx).run().await
}

pub async fn once(ctx: &AppContext) {
    scheduler::run_cycle(ctx).await;
}

pub fn list_sources(ctx: &AppContext) {
    for source in ctx.registry.sources() {
        println!("{}\n  {}", source.name, source.url);
    }
}
