//! # Merai façade
//!
//! [`Merai`] loads the ephemeris, the star catalog and the constellation map once, then answers
//! any number of independent queries. It is `Send + Sync` and cheap to clone: the loaded data sits
//! behind `Arc`s and the HTTP agent is shared.
//!
//! ```rust,no_run
//! use merai::merai::{Merai, MeraiConfig};
//! use merai::observers::ObserverFrame;
//! use merai::time::now_utc;
//!
//! let merai = Merai::new(MeraiConfig::default())?;
//! let observer = ObserverFrame::new(48.85, 2.35, now_utc()?)?;
//! let objects = merai.visible_objects(&observer);
//! let described = merai.describe(&objects);
//! # Ok::<(), merai::merai_errors::MeraiError>(())
//! ```
use std::{sync::Arc, time::Duration};

use camino::Utf8PathBuf;
use log::info;

use crate::{
    catalog::{constellation::ConstellationMap, load_star_catalog, StarRecord},
    constants::HTTP_TIMEOUT_SECS,
    enrichment::{
        describe_all, enrich,
        geolocation::{GeoLocation, GeoLocator, IpGeoLocator},
        wiki::{SummaryProvider, WikiSummaryClient},
        DescribedObject,
    },
    env_state::MeraiEnv,
    jpl_ephem::{download_jpl_file::EphemSource, Ephemeris},
    merai_errors::MeraiError,
    observers::ObserverFrame,
    sky_chart::{project, zoom::ZoomLevel, ChartSpec},
    visibility::{VisibilityEngine, VisibleObject},
};

/// Where the static data lives and how long external calls may take.
#[derive(Debug, Clone, PartialEq)]
pub struct MeraiConfig {
    pub ephemeris: EphemSource,
    pub star_catalog: Utf8PathBuf,
    /// Any CSV with `hip` and `con` columns.
    pub constellation_file: Utf8PathBuf,
    pub http_timeout: Duration,
}

impl Default for MeraiConfig {
    fn default() -> Self {
        MeraiConfig {
            ephemeris: EphemSource::Naif("de421".to_string()),
            star_catalog: Utf8PathBuf::from("hip_main.dat"),
            constellation_file: Utf8PathBuf::from("hygdata_v41.csv"),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Merai {
    env: MeraiEnv,
    engine: VisibilityEngine,
    constellations: Arc<ConstellationMap>,
    summaries: WikiSummaryClient,
}

impl Merai {
    /// Load every data set named by `config`.
    ///
    /// Errors
    /// ----------
    /// * [`MeraiError::DataUnavailable`] if the ephemeris, the catalog or the constellation file
    ///   is missing or unusable.
    pub fn new(config: MeraiConfig) -> Result<Self, MeraiError> {
        let ephemeris = Ephemeris::load(&config.ephemeris)?;
        let stars = load_star_catalog(&config.star_catalog)?;
        let constellations = ConstellationMap::load(&config.constellation_file)?;
        info!(
            "Merai ready: ephemeris {}, {} stars, {} constellation entries",
            config.ephemeris,
            stars.len(),
            constellations.len()
        );

        Ok(Self::from_parts(
            ephemeris,
            stars,
            constellations,
            MeraiEnv::with_timeout(config.http_timeout),
        ))
    }

    /// Assemble from data sets already in memory.
    pub fn from_parts(
        ephemeris: Ephemeris,
        stars: Vec<StarRecord>,
        constellations: ConstellationMap,
        env: MeraiEnv,
    ) -> Self {
        Merai {
            engine: VisibilityEngine::new(Arc::new(ephemeris), Arc::new(stars)),
            constellations: Arc::new(constellations),
            summaries: WikiSummaryClient::new(env.clone()),
            env,
        }
    }

    pub fn engine(&self) -> &VisibilityEngine {
        &self.engine
    }

    pub fn constellations(&self) -> &ConstellationMap {
        &self.constellations
    }

    pub fn env(&self) -> &MeraiEnv {
        &self.env
    }

    /// Objects above the horizon, constellations attached.
    pub fn visible_objects(&self, observer: &ObserverFrame) -> Vec<VisibleObject> {
        enrich(&self.engine.compute_visible(observer), &self.constellations)
    }

    /// Chart of the objects above the horizon.
    pub fn sky_chart(&self, observer: &ObserverFrame, zoom: ZoomLevel) -> ChartSpec {
        project(&self.visible_objects(observer), observer, zoom)
    }

    /// Summaries and images from Wikipedia, one concurrent lookup per object.
    pub fn describe(&self, objects: &[VisibleObject]) -> Vec<DescribedObject> {
        describe_all(objects, &self.summaries)
    }

    pub fn describe_with<P: SummaryProvider + ?Sized>(
        &self,
        objects: &[VisibleObject],
        provider: &P,
    ) -> Vec<DescribedObject> {
        describe_all(objects, provider)
    }

    /// Observer location from the public IP address.
    pub fn locate(&self) -> Result<GeoLocation, MeraiError> {
        IpGeoLocator::new(self.env.clone()).resolve_location()
    }
}

#[cfg(test)]
mod test_merai {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeraiConfig::default();
        assert_eq!(config.ephemeris.to_string(), "naif:DE421");
        assert_eq!(config.star_catalog, "hip_main.dat");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_data_is_fatal() {
        let config = MeraiConfig {
            ephemeris: EphemSource::Path(Utf8PathBuf::from("/nowhere/de421.bsp")),
            ..MeraiConfig::default()
        };
        assert!(matches!(
            Merai::new(config),
            Err(MeraiError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_merai_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Merai>();
    }
}
