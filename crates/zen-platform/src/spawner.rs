use futures::future::LocalBoxFuture;
use zen_core::ports::Spawner;

/// Runs futures on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
