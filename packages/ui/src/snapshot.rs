use dioxus::prelude::*;
use store::EntityStream;

/// Mirror an [`EntityStream`]'s snapshots into a render signal.
///
/// The signal starts at the stream's current snapshot and is updated on
/// every subsequent publish, re-rendering whatever reads it:
///
/// ```ignore
/// let stores = use_stores();
/// let pessoas = use_snapshot(stores.pessoas.subscribe());
/// ```
pub fn use_snapshot<T: Clone + 'static>(stream: EntityStream<T>) -> Signal<T> {
    let initial = stream.current();
    let mut snapshot = use_signal(move || initial);
    use_hook(move || {
        let mut stream = stream;
        spawn(async move {
            while let Some(value) = stream.changed().await {
                snapshot.set(value);
            }
        });
    });
    snapshot
}
