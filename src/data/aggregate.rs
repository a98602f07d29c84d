//! Turns raw entity samples into gauges.

use std::collections::HashMap;

use super::gauge::{parse_tags, Gauge, Tag};
use super::normalize::normalize;
use crate::source::{AbsentSignals, ReferenceData, SamplesSnapshot};

/// Identifies one gauge within a pass: (normalized name, signal type, signal name).
type GaugeKey = (String, String, String);

/// Accumulates gauges for one aggregation pass, keeping first-seen order.
#[derive(Debug, Default)]
struct GaugeSet {
    gauges: Vec<Gauge>,
    index: HashMap<GaugeKey, usize>,
}

impl GaugeSet {
    fn contains(&self, key: &GaugeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Add `count` to the gauge for `key`, creating it with `tags` if needed.
    fn merge(&mut self, key: GaugeKey, count: i64, tags: impl FnOnce() -> Vec<Tag>) {
        if let Some(&i) = self.index.get(&key) {
            let gauge = &mut self.gauges[i];
            gauge.count = gauge.count.saturating_add(count);
            return;
        }

        self.gauges.push(Gauge {
            name: key.0.clone(),
            count,
            tags: tags(),
        });
        self.index.insert(key, self.gauges.len() - 1);
    }
}

/// Entity tags followed by the synthesized signal tags.
fn signal_tags(entity_tags: &[Tag], kind: &str, name: &str) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(entity_tags.len() + 2);
    tags.extend_from_slice(entity_tags);
    tags.push(Tag::pair("signal_type", kind));
    tags.push(Tag::pair("signal_name", name));
    tags
}

/// Convert one samples file into gauges.
///
/// Red and green values for the same signal are summed into a single gauge.
/// Entities set to treat absent signals as zero also get a zero gauge for
/// every known signal they did not report, in virtual, item, fluid order.
/// Entities with an empty name are skipped.
///
/// Gauges are keyed by normalized name, so entities whose names normalize
/// to the same string share gauges: their counts are summed and the tags
/// of the first such entity are kept. Tags set on any later entity with
/// that name are discarded.
pub fn aggregate(reference: &ReferenceData, samples: &SamplesSnapshot) -> Vec<Gauge> {
    let mut set = GaugeSet::default();

    for entity in &samples.entities {
        let settings = &entity.settings;
        if settings.name.is_empty() {
            continue;
        }

        let name = normalize(&settings.name);
        let entity_tags = parse_tags(&settings.tags);

        for signal in entity.signals() {
            let id = &signal.signal;
            let key = (name.clone(), id.kind.clone(), id.name.clone());
            set.merge(key, signal.count, || {
                signal_tags(&entity_tags, &id.kind, &id.name)
            });
        }

        if settings.absent_signals == AbsentSignals::TreatAsZero {
            for (kind, signal_names) in reference.categories() {
                for signal_name in signal_names {
                    let key = (name.clone(), kind.to_string(), signal_name.clone());
                    if !set.contains(&key) {
                        set.merge(key, 0, || signal_tags(&entity_tags, kind, signal_name));
                    }
                }
            }
        }
    }

    set.gauges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{EntitySample, EntitySettings, SignalCount, SignalId};

    fn reference() -> ReferenceData {
        ReferenceData {
            virtual_signal_names: vec!["signal-A".to_string()],
            item_names: vec!["coal".to_string()],
            fluid_names: vec!["water".to_string()],
        }
    }

    fn signal(kind: &str, name: &str, count: i64) -> SignalCount {
        SignalCount {
            signal: SignalId {
                kind: kind.to_string(),
                name: name.to_string(),
            },
            count,
        }
    }

    fn entity(name: &str, tags: &str, absent: AbsentSignals) -> EntitySample {
        EntitySample {
            settings: EntitySettings {
                name: name.to_string(),
                tags: tags.to_string(),
                absent_signals: absent,
            },
            red_signals: Vec::new(),
            green_signals: Vec::new(),
        }
    }

    fn base_tags(kind: &str, name: &str) -> Vec<Tag> {
        vec![
            Tag::pair("base", "alpha"),
            Tag::pair("planet", "nauvis"),
            Tag::bare("ores"),
            Tag::pair("signal_type", kind),
            Tag::pair("signal_name", name),
        ]
    }

    fn sorted(mut gauges: Vec<Gauge>) -> Vec<Gauge> {
        gauges.sort_by(|a, b| {
            (&a.name, format!("{:?}", a.tags)).cmp(&(&b.name, format!("{:?}", b.tags)))
        });
        gauges
    }

    #[test]
    fn test_no_entities() {
        let gauges = aggregate(&ReferenceData::default(), &SamplesSnapshot::default());
        assert!(gauges.is_empty());
    }

    #[test]
    fn test_ignore_absent_signals() {
        let mut e = entity("my_metric", "base=alpha,planet=nauvis,ores", AbsentSignals::Ignore);
        e.red_signals.push(signal("item", "coal", 2));
        let samples = SamplesSnapshot { entities: vec![e] };

        let gauges = aggregate(&reference(), &samples);
        assert_eq!(
            gauges,
            vec![Gauge {
                name: "my_metric".to_string(),
                count: 2,
                tags: base_tags("item", "coal"),
            }]
        );
    }

    #[test]
    fn test_treat_absent_as_zero() {
        let mut e = entity(
            "my_metric",
            "base=alpha,planet=nauvis,ores",
            AbsentSignals::TreatAsZero,
        );
        e.red_signals.push(signal("item", "coal", 2));
        let samples = SamplesSnapshot { entities: vec![e] };

        let gauges = aggregate(&reference(), &samples);
        let expected = vec![
            Gauge {
                name: "my_metric".to_string(),
                count: 2,
                tags: base_tags("item", "coal"),
            },
            Gauge {
                name: "my_metric".to_string(),
                count: 0,
                tags: base_tags("virtual", "signal-A"),
            },
            Gauge {
                name: "my_metric".to_string(),
                count: 0,
                tags: base_tags("fluid", "water"),
            },
        ];
        assert_eq!(sorted(gauges), sorted(expected));
    }

    #[test]
    fn test_zero_gauges_follow_category_order() {
        let e = entity("tank", "", AbsentSignals::TreatAsZero);
        let samples = SamplesSnapshot { entities: vec![e] };

        let kinds: Vec<String> = aggregate(&reference(), &samples)
            .into_iter()
            .map(|g| g.tags[0].value.clone().unwrap())
            .collect();
        assert_eq!(kinds, vec!["virtual", "item", "fluid"]);
    }

    #[test]
    fn test_red_and_green_are_summed() {
        let mut e = entity("belt", "", AbsentSignals::Ignore);
        e.red_signals.push(signal("item", "coal", 2));
        e.red_signals.push(signal("item", "stone", 7));
        e.green_signals.push(signal("item", "coal", 5));
        let samples = SamplesSnapshot { entities: vec![e] };

        let gauges = aggregate(&reference(), &samples);
        assert_eq!(gauges.len(), 2);

        let coal = gauges
            .iter()
            .find(|g| g.tags.contains(&Tag::pair("signal_name", "coal")))
            .unwrap();
        assert_eq!(coal.count, 7);
        assert_eq!(
            coal.tags,
            vec![Tag::pair("signal_type", "item"), Tag::pair("signal_name", "coal")]
        );
    }

    #[test]
    fn test_observed_zero_is_not_duplicated() {
        let mut e = entity("chest", "", AbsentSignals::TreatAsZero);
        e.green_signals.push(signal("fluid", "water", -3));
        let samples = SamplesSnapshot { entities: vec![e] };

        let gauges = aggregate(&reference(), &samples);
        assert_eq!(gauges.len(), 3);
        let water: Vec<_> = gauges
            .iter()
            .filter(|g| g.tags.contains(&Tag::pair("signal_name", "water")))
            .collect();
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].count, -3);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let mut e = entity("", "base=alpha", AbsentSignals::TreatAsZero);
        e.red_signals.push(signal("item", "coal", 2));
        let samples = SamplesSnapshot { entities: vec![e] };

        assert!(aggregate(&reference(), &samples).is_empty());
    }

    #[test]
    fn test_names_are_normalized() {
        let mut e = entity("3Bad Name!", "", AbsentSignals::Ignore);
        e.red_signals.push(signal("virtual", "signal-A", 1));
        let samples = SamplesSnapshot { entities: vec![e] };

        let gauges = aggregate(&reference(), &samples);
        assert_eq!(gauges[0].name, "x3bad_name_");
    }

    #[test]
    fn test_entities_with_same_normalized_name_share_gauges() {
        let mut first = entity("Smelter", "line=1", AbsentSignals::Ignore);
        first.red_signals.push(signal("item", "coal", 2));
        let mut second = entity("smelter", "line=2", AbsentSignals::Ignore);
        second.red_signals.push(signal("item", "coal", 3));
        second.red_signals.push(signal("item", "stone", 1));
        let samples = SamplesSnapshot {
            entities: vec![first, second],
        };

        let gauges = aggregate(&reference(), &samples);
        assert_eq!(gauges.len(), 2);
        assert_eq!(gauges[0].count, 5);
        assert_eq!(gauges[0].tags[0], Tag::pair("line", "1"));
        assert_eq!(gauges[1].tags[0], Tag::pair("line", "2"));
    }

    #[test]
    fn test_count_merge_saturates() {
        let mut e = entity("big", "", AbsentSignals::Ignore);
        e.red_signals.push(signal("item", "coal", i64::MAX));
        e.green_signals.push(signal("item", "coal", 1));
        let samples = SamplesSnapshot { entities: vec![e] };

        assert_eq!(aggregate(&reference(), &samples)[0].count, i64::MAX);
    }
}
