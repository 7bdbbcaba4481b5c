use super::IClubRepo;
use crate::repos::shared::inmemory_repo::*;
use klubbhus_notifier_domain::{Club, ID};

pub struct InMemoryClubRepo {
    clubs: std::sync::Mutex<Vec<Club>>,
}

impl InMemoryClubRepo {
    pub fn new() -> Self {
        Self {
            clubs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IClubRepo for InMemoryClubRepo {
    async fn insert(&self, club: &Club) -> anyhow::Result<()> {
        insert(club, &self.clubs);
        Ok(())
    }

    async fn save(&self, club: &Club) -> anyhow::Result<()> {
        save(club, &self.clubs);
        Ok(())
    }

    async fn find(&self, club_id: &ID) -> Option<Club> {
        find(club_id, &self.clubs)
    }

    async fn find_by_member(&self, user_id: &ID) -> anyhow::Result<Vec<Club>> {
        Ok(find_by(&self.clubs, |c| c.members.contains(user_id)))
    }

    async fn find_by_admin(&self, user_id: &ID) -> anyhow::Result<Vec<Club>> {
        Ok(find_by(&self.clubs, |c| c.admins.contains(user_id)))
    }
}
