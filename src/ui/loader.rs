use super::slot::{ImageApply, RowSlot};
use crate::cache::ImageData;
use crate::models::ExploreCard;
use crate::service::ExploreService;
use crate::store::ExploreCardStore;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Message sent from background image loader tasks
#[derive(Debug)]
pub struct LoadedImage {
    pub slot: usize,
    /// Identity of the card the image was requested for
    pub card_id: String,
    pub image: Option<ImageData>,
}

/// Tally of arrivals applied to slots
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    pub applied: usize,
    pub stale: usize,
    pub unavailable: usize,
}

impl DrainStats {
    fn record(&mut self, outcome: ImageApply) {
        match outcome {
            ImageApply::Applied => self.applied += 1,
            ImageApply::Stale => self.stale += 1,
            ImageApply::Unavailable => self.unavailable += 1,
        }
    }
}

/// Loads row images in background tasks and hands them back to the UI
pub struct ImageLoader {
    runtime: Handle,
    sender: UnboundedSender<LoadedImage>,
    receiver: UnboundedReceiver<LoadedImage>,
    tasks: Vec<JoinHandle<()>>,
}

impl ImageLoader {
    pub fn new(runtime: Handle) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            runtime,
            sender,
            receiver,
            tasks: Vec::new(),
        }
    }

    /// Spawn a task loading `card`'s image for `slot`
    pub fn request<S: ExploreService>(
        &mut self,
        store: &ExploreCardStore<S>,
        slot: usize,
        card: &ExploreCard,
    ) {
        let load = store.request_image(card);
        let card_id = card.id().to_string();
        let sender = self.sender.clone();

        log::debug!("Requesting image for slot {}: {}", slot, card_id);
        let task = self.runtime.spawn(async move {
            let image = load.await;
            if sender
                .send(LoadedImage {
                    slot,
                    card_id,
                    image,
                })
                .is_err()
            {
                log::debug!("Image loader dropped before image arrived");
            }
        });
        self.tasks.push(task);
    }

    /// Apply every image that has arrived, without waiting
    pub fn drain(&mut self, slots: &mut [RowSlot]) -> DrainStats {
        self.tasks.retain(|task| !task.is_finished());
        let mut stats = DrainStats::default();
        while let Ok(loaded) = self.receiver.try_recv() {
            stats.record(Self::apply(slots, loaded));
        }
        stats
    }

    /// Wait for every outstanding request and apply the results
    pub async fn settle(&mut self, slots: &mut [RowSlot]) -> DrainStats {
        // Each task sends before it finishes, so once all are joined the
        // channel holds every result
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                log::error!("Image load task failed: {}", e);
            }
        }
        self.drain(slots)
    }

    fn apply(slots: &mut [RowSlot], loaded: LoadedImage) -> ImageApply {
        match slots.get_mut(loaded.slot) {
            Some(slot) => slot.apply_image(&loaded.card_id, loaded.image),
            None => ImageApply::Stale,
        }
    }
}
