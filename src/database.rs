// 🗂️ NEO Database - links close approaches to their NEOs
//
// The database is the only long-lived owner of the loaded NEOs. Each close
// approach holds a shared read-only handle to its NEO; nothing mutates a NEO
// after loading.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::entities::{CloseApproach, NearEarthObject};
use crate::filters::ApproachFilter;

pub struct NeoDatabase {
    neos: Vec<Arc<NearEarthObject>>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    orphans: usize,
}

impl NeoDatabase {
    /// Index the NEOs and link every close approach
    ///
    /// Approaches whose designation matches no NEO are linked to an
    /// unknown placeholder so consumers never see an unlinked record.
    pub fn new(neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let neos: Vec<Arc<NearEarthObject>> = neos.into_iter().map(Arc::new).collect();

        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();
        for (idx, neo) in neos.iter().enumerate() {
            // First occurrence wins on duplicate keys
            by_designation.entry(neo.designation.clone()).or_insert(idx);
            if let Some(name) = &neo.name {
                by_name.entry(name.clone()).or_insert(idx);
            }
        }

        let mut orphans = 0;
        for approach in approaches.iter_mut() {
            match by_designation.get(&approach.designation) {
                Some(&idx) => approach.link(Arc::clone(&neos[idx])),
                None => {
                    orphans += 1;
                    let placeholder = NearEarthObject::unknown(&approach.designation);
                    approach.link(Arc::new(placeholder));
                }
            }
        }

        if orphans > 0 {
            warn!(orphans, "Close approaches reference unknown NEOs");
        }
        debug!(
            neos = neos.len(),
            approaches = approaches.len(),
            "Linked close approaches to NEOs"
        );

        NeoDatabase {
            neos,
            approaches,
            by_designation,
            by_name,
            orphans,
        }
    }

    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|&idx| self.neos[idx].as_ref())
    }

    /// Exact match on the IAU name; unnamed NEOs are never found
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        if name.is_empty() {
            return None;
        }
        self.by_name.get(name).map(|&idx| self.neos[idx].as_ref())
    }

    /// Close approaches of one NEO, in load order
    pub fn approaches_for<'a>(
        &'a self,
        designation: &'a str,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches
            .iter()
            .filter(move |a| a.designation == designation)
    }

    /// Close approaches satisfying every criterion, in load order
    pub fn query<'a>(
        &'a self,
        filter: &'a ApproachFilter,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches.iter().filter(move |a| filter.matches(a))
    }

    pub fn neos(&self) -> impl Iterator<Item = &NearEarthObject> {
        self.neos.iter().map(|n| n.as_ref())
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Number of approaches linked to a placeholder
    pub fn orphan_count(&self) -> usize {
        self.orphans
    }
}
