//! Flat-file JSON persistence.
//!
//! Every durable record lives in a JSON document under `data_dir`. The store
//! serializes all read-modify-write sequences through one writer gate: a
//! [`StoreTxn`] holds the write half of an `RwLock` for its whole lifetime,
//! so two concurrent submissions cannot read the same snapshot and clobber
//! each other's update. Plain reads share the read half and observe a
//! point-in-time snapshot.

pub mod models;

use std::path::PathBuf;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use models::{ChatFile, FaqFile, FoodEntry, QuestionFile, User};

const USERS_FILE: &str = "users.json";
const ENTRIES_FILE: &str = "food_entries.json";
const QUESTIONS_FILE: &str = "questions.json";
const CHAT_FILE: &str = "chat.json";
const FAQ_FILE: &str = "faq.json";

pub struct JsonStore {
    data_dir: PathBuf,
    gate: RwLock<()>,
}

impl JsonStore {
    pub async fn open(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("create data dir {}", data_dir.display()))?;
        Ok(Self {
            data_dir,
            gate: RwLock::new(()),
        })
    }

    /// Shared snapshot access. Multiple readers may run concurrently.
    pub async fn read(&self) -> StoreReader<'_> {
        StoreReader {
            store: self,
            _guard: self.gate.read().await,
        }
    }

    /// Exclusive read-modify-write access. Held for the whole sequence.
    pub async fn write(&self) -> StoreTxn<'_> {
        StoreTxn {
            store: self,
            _guard: self.gate.write().await,
        }
    }

    async fn load<T: DeserializeOwned + Default>(&self, name: &str) -> anyhow::Result<T> {
        let path = self.data_dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                    return Ok(T::default());
                }
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("parse {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    async fn save<T: Serialize>(&self, name: &str, value: &T) -> anyhow::Result<()> {
        let path = self.data_dir.join(name);
        let tmp = self.data_dir.join(format!("{name}.tmp"));
        let bytes = serde_json::to_vec_pretty(value).context("serialize store file")?;
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }
}

pub struct StoreReader<'a> {
    store: &'a JsonStore,
    _guard: RwLockReadGuard<'a, ()>,
}

impl StoreReader<'_> {
    pub async fn users(&self) -> anyhow::Result<Vec<User>> {
        self.store.load(USERS_FILE).await
    }

    pub async fn entries(&self) -> anyhow::Result<Vec<FoodEntry>> {
        self.store.load(ENTRIES_FILE).await
    }

    pub async fn questions(&self) -> anyhow::Result<QuestionFile> {
        self.store.load(QUESTIONS_FILE).await
    }

    pub async fn chat(&self) -> anyhow::Result<ChatFile> {
        self.store.load(CHAT_FILE).await
    }

    pub async fn faqs(&self) -> anyhow::Result<FaqFile> {
        self.store.load(FAQ_FILE).await
    }
}

pub struct StoreTxn<'a> {
    store: &'a JsonStore,
    _guard: RwLockWriteGuard<'a, ()>,
}

impl StoreTxn<'_> {
    pub async fn users(&self) -> anyhow::Result<Vec<User>> {
        self.store.load(USERS_FILE).await
    }

    pub async fn entries(&self) -> anyhow::Result<Vec<FoodEntry>> {
        self.store.load(ENTRIES_FILE).await
    }

    pub async fn questions(&self) -> anyhow::Result<QuestionFile> {
        self.store.load(QUESTIONS_FILE).await
    }

    pub async fn chat(&self) -> anyhow::Result<ChatFile> {
        self.store.load(CHAT_FILE).await
    }

    pub async fn save_users(&self, users: &[User]) -> anyhow::Result<()> {
        self.store.save(USERS_FILE, &users).await
    }

    pub async fn save_entries(&self, entries: &[FoodEntry]) -> anyhow::Result<()> {
        self.store.save(ENTRIES_FILE, &entries).await
    }

    pub async fn save_chat(&self, chat: &ChatFile) -> anyhow::Result<()> {
        self.store.save(CHAT_FILE, chat).await
    }
}
