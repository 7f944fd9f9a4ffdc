use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{top_liked, Pet, PetCard};
use crate::infrastructure::PetRepo;

use super::FeedSettings;

/// Observable state behind the pet feed screen.
///
/// Exposes four watch channels: the card list, the top liked subset, a
/// loading flag for the fetch cycle, and an error flag for failed fetches.
/// Likes are confirmed after a delay and can be cancelled while the delay
/// is still running.
///
/// Clones are cheap and share all state. Construction spawns the initial
/// fetch, so it must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct PetsViewModel {
    repo: Arc<dyn PetRepo>,
    settings: FeedSettings,
    pets_tx: Arc<watch::Sender<Vec<PetCard>>>,
    top_liked_tx: Arc<watch::Sender<Vec<PetCard>>>,
    loading_tx: Arc<watch::Sender<bool>>,
    error_tx: Arc<watch::Sender<bool>>,
    pending: Arc<DashMap<String, JoinHandle<()>>>,
    fetch_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    closed: Arc<AtomicBool>,
}

impl PetsViewModel {
    pub fn new(repo: Arc<dyn PetRepo>) -> Self {
        Self::with_settings(repo, FeedSettings::default())
    }

    pub fn with_settings(repo: Arc<dyn PetRepo>, settings: FeedSettings) -> Self {
        let (pets_tx, _) = watch::channel(Vec::new());
        let (top_liked_tx, _) = watch::channel(Vec::new());
        let (loading_tx, _) = watch::channel(false);
        let (error_tx, _) = watch::channel(false);

        let vm = Self {
            repo,
            settings,
            pets_tx: Arc::new(pets_tx),
            top_liked_tx: Arc::new(top_liked_tx),
            loading_tx: Arc::new(loading_tx),
            error_tx: Arc::new(error_tx),
            pending: Arc::new(DashMap::new()),
            fetch_task: Arc::new(Mutex::new(None)),
            closed: Arc::new(AtomicBool::new(false)),
        };
        vm.refresh();
        vm
    }

    /// Current card list, replaced wholesale on fetch and patched on likes.
    pub fn pets(&self) -> watch::Receiver<Vec<PetCard>> {
        self.pets_tx.subscribe()
    }

    /// Liked cards ranked by match score, capped at the configured limit.
    pub fn top_liked(&self) -> watch::Receiver<Vec<PetCard>> {
        self.top_liked_tx.subscribe()
    }

    /// True while a fetch is in flight.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// True after a failed fetch, cleared when the next one starts.
    pub fn error(&self) -> watch::Receiver<bool> {
        self.error_tx.subscribe()
    }

    /// Number of likes still waiting out their confirmation delay.
    pub fn pending_likes(&self) -> usize {
        self.pending.len()
    }

    /// Fetch the feed again. The previous list stays visible until the new
    /// one arrives; a failure raises the error flag instead of clearing it.
    pub fn refresh(&self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        self.loading_tx.send_replace(true);
        self.error_tx.send_replace(false);

        let vm = self.clone();
        let handle = tokio::spawn(async move {
            let result = vm.repo.get_pets().await;
            vm.loading_tx.send_replace(false);

            match result {
                Ok(pets) => {
                    let cards: Vec<PetCard> = pets.into_iter().map(PetCard::new).collect();
                    tracing::debug!("feed refreshed with {} pets", cards.len());
                    vm.pets_tx.send_replace(cards);
                    vm.publish_top_liked();
                }
                Err(err) => {
                    tracing::error!("feed refresh failed: {}", err);
                    vm.error_tx.send_replace(true);
                }
            }
        });

        *self.fetch_task.lock().unwrap() = Some(handle);
    }

    /// React to a tap on a card.
    ///
    /// An already liked pet is unliked on the spot. An unliked pet gets a
    /// pending like: its card shows a spinner until the confirmation delay
    /// elapses, and only then does the liked flag flip. A second tap while
    /// a like is pending is ignored; cancelling is a separate command.
    pub fn select_pet(&self, pet: &Pet) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        if pet.liked {
            if let Some((_, stale)) = self.pending.remove(&pet.user_id) {
                stale.abort();
            }
            self.toggle_liked(&pet.user_id);
            return;
        }

        match self.pending.entry(pet.user_id.clone()) {
            Entry::Occupied(_) => {
                tracing::debug!("like for {} already pending", pet.user_id);
            }
            Entry::Vacant(slot) => {
                self.set_card_loading(&pet.user_id, true);

                let vm = self.clone();
                let user_id = pet.user_id.clone();
                let delay = self.settings.like_delay;
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    vm.confirm_like(&user_id);
                });

                // The task removes this entry when it fires, so the handle
                // must be in the map before the entry guard drops.
                slot.insert(handle);
            }
        }
    }

    /// Abort a pending like and clear the card's spinner. No pending like
    /// for the pet means nothing happens.
    pub fn cancel_like(&self, pet: &Pet) {
        if let Some((_, handle)) = self.pending.remove(&pet.user_id) {
            // An abort landing after the sleep completed is a no-op; the
            // entry removal above already decided that race.
            handle.abort();
            self.set_card_loading(&pet.user_id, false);
            tracing::debug!(
                "like for {} cancelled, {} still pending",
                pet.user_id,
                self.pending.len()
            );
        }
    }

    /// Abort the in-flight fetch and every pending like. Afterwards the
    /// whole clone family refuses new fetches and likes; the channels keep
    /// their last values.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(handle) = self.fetch_task.lock().unwrap().take() {
            handle.abort();
        }

        for entry in self.pending.iter() {
            entry.value().abort();
        }
        self.pending.clear();

        tracing::debug!("pet feed shut down");
    }

    fn confirm_like(&self, user_id: &str) {
        self.pending.remove(user_id);
        self.toggle_liked(user_id);
        tracing::debug!(
            "like for {} confirmed, {} still pending",
            user_id,
            self.pending.len()
        );
    }

    fn toggle_liked(&self, user_id: &str) {
        self.pets_tx.send_modify(|cards| {
            if let Some(card) = cards.iter_mut().find(|card| card.pet.user_id == user_id) {
                card.pet.liked = !card.pet.liked;
                card.is_loading = false;
            }
        });
        self.publish_top_liked();
    }

    fn set_card_loading(&self, user_id: &str, value: bool) {
        self.pets_tx.send_modify(|cards| {
            if let Some(card) = cards.iter_mut().find(|card| card.pet.user_id == user_id) {
                card.is_loading = value;
            }
        });
    }

    fn publish_top_liked(&self) {
        let top = top_liked(&self.pets_tx.borrow(), self.settings.top_liked_limit);
        self.top_liked_tx.send_replace(top);
    }
}
