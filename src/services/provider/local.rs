use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

use super::RoastProvider;
use crate::error::ProviderError;
use crate::kernel::form::SubmissionRecord;
use crate::kernel::roast::RoastResult;

/// Pre-written roasts served when no roast service is configured.
pub const SAMPLE_ROASTS: [&str; 5] = [
    "You have the energy of a phone at 2% that refuses to die out of spite.\n\
     Your fashion sense looks like it was chosen by a shuffle button.\n\
     Your hobbies list reads like a cry for help written in a group chat nobody checks.\n\
     You're the human equivalent of a loading screen tip: technically useful, universally skipped.\n\
     Even your reflection takes a second to decide whether to show up.\n\
     You peaked during a group project and the rest of the group did all the work.",
    "Your personality is like elevator music: present, inoffensive and immediately forgotten.\n\
     You don't have a career, you have a LinkedIn that's in witness protection.\n\
     Your life choices would make a GPS say 'recalculating' forever.\n\
     You're proof that confidence and competence are not on speaking terms.\n\
     Your friends describe you as 'a lot' and they don't mean quantity.\n\
     If awkward were an Olympic sport, you'd still trip on the podium.",
    "You look like the before picture in an ad for sleep.\n\
     Your age is a number, and so is your follower count, sadly both are going the wrong way.\n\
     You have the charisma of a terms-and-conditions page.\n\
     Your hobbies are so niche even the algorithm gave up on you.\n\
     You text 'lol' with the emotional range of a parking ticket.\n\
     You're not a snack, you're the crumbs at the bottom of the bag.\n\
     Somewhere out there is a tree producing oxygen for you. It owes us an apology.",
    "You've been 'finding yourself' for so long the search party went home.\n\
     Your dance moves look like a software update that failed halfway.\n\
     You bring nothing to the table except your own complaints about the table.\n\
     Your cooking is the reason the smoke detector has trust issues.\n\
     You have main character energy in a movie that went straight to DVD.\n\
     Your embarrassing fact isn't the embarrassing part. You are.",
    "You're the reason shampoo bottles have instructions.\n\
     Your resume is mostly hobbies and one suspiciously long gap.\n\
     You give off the vibe of a group chat that only sends memes from 2014.\n\
     You're not lazy, you're just on energy-saving mode permanently.\n\
     Your personality was clearly assembled from the clearance bin.\n\
     Your selfie camera files complaints with HR.",
];

/// In-process provider over a fixed pool of sample roasts.
pub struct LocalProvider {
    pool: Vec<String>,
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Same seed, same sequence of picks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pool: SAMPLE_ROASTS.iter().map(|r| r.to_string()).collect(),
            rng: Mutex::new(rng),
            delay: Duration::ZERO,
        }
    }

    pub fn with_pool(mut self, pool: Vec<String>) -> Self {
        self.pool = pool;
        self
    }

    /// Pretends to be a slow service.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn pick(&self) -> Option<String> {
        if self.pool.is_empty() {
            return None;
        }
        let index = match self.rng.lock() {
            Ok(mut rng) => rng.random_range(0..self.pool.len()),
            Err(_) => 0,
        };
        self.pool.get(index).cloned()
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoastProvider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(&self, record: &SubmissionRecord) -> Result<RoastResult, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let roast = self
            .pick()
            .ok_or_else(|| ProviderError::Empty("sample pool is empty".to_string()))?;

        Ok(RoastResult::new(roast, record.clone()))
    }
}
