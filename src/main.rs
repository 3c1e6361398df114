use serialstore::{SerialStore, StoreConfig};
use tracing::{error, info};

const KEYS_PER_WRITER: u64 = 1_000;

#[tokio::main]
async fn main() {
    // Initialize logging (INFO by default, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        error!("serialstore demo failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::var("SERIALSTORE_CONFIG") {
        Ok(json) => StoreConfig::from_json(&json)?,
        Err(_) => StoreConfig::default(),
    };
    let store: SerialStore<String, u64> = SerialStore::with_config(config)?;

    // One writer per CPU core (min 1, max 16)
    let num_writers = num_cpus::get().clamp(1, 16) as u64;
    info!("Starting {} writers and {} readers", num_writers, num_writers);

    let mut writers = Vec::new();
    for w in 0..num_writers {
        let store = store.clone();
        writers.push(tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            for i in 0..KEYS_PER_WRITER {
                let key = format!("w{}-k{}", w, i % 100);
                store.blocking_set(key.clone(), i)?;
                if i % 7 == 0 {
                    store.blocking_delete(key)?;
                }
            }
            Ok(())
        }));
    }

    let mut readers = Vec::new();
    for r in 0..num_writers {
        let store = store.clone();
        readers.push(tokio::spawn(async move {
            let mut hits = 0u64;
            for i in 0..KEYS_PER_WRITER {
                let key = format!("w{}-k{}", r, i % 100);
                if store.exist(key.clone()).await? {
                    hits += 1;
                }
                let _ = store.get(key).await?;
            }
            anyhow::Ok(hits)
        }));
    }

    for writer in writers {
        writer.await??;
    }
    for (r, reader) in readers.into_iter().enumerate() {
        let hits = reader.await??;
        info!("Reader {} saw {} present keys", r, hits);
    }

    let stats = store.stats().await?;
    info!(
        "Store holds {} entries after {} requests",
        stats.entries, stats.requests_served
    );

    let snapshot = store.snapshot().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    store.close().await?;
    info!("Store closed");

    Ok(())
}
