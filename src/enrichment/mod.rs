//! # Object enrichment
//!
//! * [`enrich`] attaches the constellation of every star (pure, no I/O),
//! * [`describe_all`] attaches a text summary and an image to every object through a
//!   [`SummaryProvider`], one worker per object,
//! * [`geolocation`] resolves the observer location from the network.
use std::thread;

use crate::{
    catalog::{constellation::ConstellationMap, hip_designation},
    constants::{NOT_APPLICABLE, UNKNOWN_CONSTELLATION},
    visibility::{ObjectKind, VisibleObject},
};
use wiki::{extract_name_from_description, ObjectSummary, SummaryProvider};

pub mod geolocation;
pub mod wiki;

/// Copy of `objects` with the constellation of every star filled from `constellations`
/// (`"Unknown"` on a miss) and `"N/A"` for every other kind.
pub fn enrich(objects: &[VisibleObject], constellations: &ConstellationMap) -> Vec<VisibleObject> {
    objects
        .iter()
        .map(|object| {
            let constellation = match (object.kind, object.catalog_id) {
                (ObjectKind::Star, Some(id)) => constellations.get(id).to_string(),
                (ObjectKind::Star, None) => UNKNOWN_CONSTELLATION.to_string(),
                _ => NOT_APPLICABLE.to_string(),
            };
            VisibleObject {
                constellation,
                ..object.clone()
            }
        })
        .collect()
}

/// Key used to look an object up: `HIP <id>` for catalog stars, the name otherwise.
pub fn description_key(object: &VisibleObject) -> String {
    match (object.kind, object.catalog_id) {
        (ObjectKind::Star, Some(id)) => hip_designation(id),
        _ => object.name.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribedObject {
    pub object: VisibleObject,
    pub summary: Option<ObjectSummary>,
    /// Common name read from the summary text, stars only.
    pub extracted_name: Option<String>,
}

impl DescribedObject {
    pub fn new(object: VisibleObject, summary: Option<ObjectSummary>) -> Self {
        let extracted_name = match object.kind {
            ObjectKind::Star => summary
                .as_ref()
                .and_then(|s| s.text.as_deref())
                .and_then(extract_name_from_description),
            _ => None,
        };
        DescribedObject {
            object,
            summary,
            extracted_name,
        }
    }

    /// Name to show: a star only known by its `HIP n` designation takes the name found in its
    /// description.
    pub fn display_name(&self) -> &str {
        let synthetic = self
            .object
            .catalog_id
            .is_some_and(|id| self.object.name == hip_designation(id));
        match &self.extracted_name {
            Some(name) if synthetic => name,
            _ => &self.object.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.summary.as_ref().and_then(|s| s.text.as_deref())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.summary.as_ref().and_then(|s| s.image_url.as_deref())
    }
}

/// Describe every object concurrently.
///
/// Each lookup runs in its own scoped thread so a slow answer only delays its own object. The
/// output keeps the input order; a lookup that fails (or panics) leaves the summary empty.
pub fn describe_all<P>(objects: &[VisibleObject], provider: &P) -> Vec<DescribedObject>
where
    P: SummaryProvider + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = objects
            .iter()
            .map(|object| scope.spawn(move || provider.fetch_summary(&description_key(object))))
            .collect();

        objects
            .iter()
            .zip(handles)
            .map(|(object, handle)| DescribedObject::new(object.clone(), handle.join().ok().flatten()))
            .collect()
    })
}

#[cfg(test)]
mod test_enrichment {
    use super::*;
    use std::{collections::HashMap, time::Duration};

    fn object(name: &str, kind: ObjectKind, catalog_id: Option<u32>) -> VisibleObject {
        VisibleObject {
            name: name.to_string(),
            kind,
            altitude: 42.0,
            azimuth: 120.5,
            catalog_id,
            constellation: "placeholder".to_string(),
        }
    }

    struct FakeProvider(HashMap<&'static str, &'static str>);

    impl SummaryProvider for FakeProvider {
        fn fetch_summary(&self, key: &str) -> Option<ObjectSummary> {
            if key == "Slow" {
                thread::sleep(Duration::from_millis(50));
            }
            self.0.get(key).map(|text| ObjectSummary {
                text: Some(text.to_string()),
                image_url: Some(format!("https://img/{key}.jpg")),
            })
        }
    }

    #[test]
    fn test_enrich() {
        let map: ConstellationMap = [(32349, "Canis Major".to_string())].into_iter().collect();
        let objects = vec![
            object("Sirius", ObjectKind::Star, Some(32349)),
            object("HIP 1", ObjectKind::Star, Some(1)),
            object("Mars", ObjectKind::Planet, None),
            object("Moon", ObjectKind::Moon, None),
        ];

        let enriched = enrich(&objects, &map);
        let constellations: Vec<&str> = enriched.iter().map(|o| o.constellation.as_str()).collect();
        assert_eq!(constellations, ["Canis Major", "Unknown", "N/A", "N/A"]);
        // input untouched
        assert!(objects.iter().all(|o| o.constellation == "placeholder"));
        assert_eq!(enriched[0].altitude, objects[0].altitude);
    }

    #[test]
    fn test_enrich_with_empty_map() {
        let enriched = enrich(
            &[object("Vega", ObjectKind::Star, Some(91262))],
            &ConstellationMap::default(),
        );
        assert_eq!(enriched[0].constellation, "Unknown");
    }

    #[test]
    fn test_description_key() {
        assert_eq!(
            description_key(&object("Sirius", ObjectKind::Star, Some(32349))),
            "HIP 32349"
        );
        assert_eq!(description_key(&object("Jupiter", ObjectKind::Planet, None)), "Jupiter");
    }

    #[test]
    fn test_describe_all() {
        let provider = FakeProvider(HashMap::from([
            ("HIP 32349", "Sirius is the brightest star in the night sky."),
            ("HIP 27989", "Betelgeuse is a red supergiant."),
            ("Slow", "Slow is a test body."),
        ]));
        let objects = vec![
            object("Slow", ObjectKind::Other, None),
            object("HIP 32349", ObjectKind::Star, Some(32349)),
            object("Betelgeuse", ObjectKind::Star, Some(27989)),
            object("Pluto", ObjectKind::Planet, None),
        ];

        let described = describe_all(&objects, &provider);
        assert_eq!(described.len(), 4);
        assert_eq!(described[0].description(), Some("Slow is a test body."));
        assert_eq!(described[0].extracted_name, None);

        assert_eq!(described[1].display_name(), "Sirius");
        assert_eq!(described[1].image_url(), Some("https://img/HIP 32349.jpg"));

        // proper names are kept
        assert_eq!(described[2].extracted_name.as_deref(), Some("Betelgeuse"));
        assert_eq!(described[2].display_name(), "Betelgeuse");

        assert_eq!(described[3].summary, None);
        assert_eq!(described[3].display_name(), "Pluto");
    }
}
