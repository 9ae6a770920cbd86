/// One streaming service offering a title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProviderOffer {
    pub id: u64,
    pub name: String,
    pub logo_url: Option<String>,
}

/// Where a title can be watched in a single region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchProviders {
    pub region: String,
    pub link: Option<String>,
    pub flatrate: Vec<ProviderOffer>,
    pub free: Vec<ProviderOffer>,
    pub rent: Vec<ProviderOffer>,
    pub buy: Vec<ProviderOffer>,
}

impl WatchProviders {
    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty()
            && self.free.is_empty()
            && self.rent.is_empty()
            && self.buy.is_empty()
    }
}
