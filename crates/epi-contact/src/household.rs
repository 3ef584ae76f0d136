//! Random fixed-size household partition.

use epi_core::{AgentId, HouseholdId, SimRng};

use crate::{ContactError, ContactResult};

/// A partition of `[0, population)` into cohabitation units.
///
/// Every agent belongs to exactly one household.  Built once per experiment
/// and shared read-only by every simulation instance.
#[derive(Clone, Debug, Default)]
pub struct Households {
    groups:     Vec<Vec<AgentId>>,
    /// Inverse index: `membership[agent.index()]` is the agent's household.
    membership: Vec<HouseholdId>,
}

impl Households {
    /// Shuffle `[0, population)` with `rng` and cut it into contiguous groups
    /// of `household_size`.  The last group is smaller when `population` is
    /// not a multiple of `household_size`.
    ///
    /// Consumes randomness from the shared stream (one shuffle).
    pub fn build(population: usize, household_size: usize, rng: &mut SimRng) -> ContactResult<Self> {
        if household_size == 0 {
            return Err(ContactError::InvalidHouseholdSize);
        }
        let count = u32::try_from(population)
            .map_err(|_| ContactError::PopulationTooLarge(population))?;

        let mut order: Vec<AgentId> = (0..count).map(AgentId).collect();
        rng.shuffle(&mut order);

        let groups = order.chunks(household_size).map(<[AgentId]>::to_vec).collect();
        Ok(Self::from_groups_unchecked(groups, population))
    }

    /// Build from explicit groups, checking that they partition
    /// `[0, population)` exactly.
    pub fn from_groups(groups: Vec<Vec<AgentId>>, population: usize) -> ContactResult<Self> {
        let mut seen = vec![false; population];
        for (h, group) in groups.iter().enumerate() {
            for &agent in group {
                let Some(slot) = seen.get_mut(agent.index()) else {
                    return Err(ContactError::InvalidPartition(format!(
                        "household {h} contains {agent}, outside population {population}"
                    )));
                };
                if *slot {
                    return Err(ContactError::InvalidPartition(format!(
                        "{agent} appears in more than one household"
                    )));
                }
                *slot = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(ContactError::InvalidPartition(format!(
                "agent {missing} belongs to no household"
            )));
        }
        Ok(Self::from_groups_unchecked(groups, population))
    }

    fn from_groups_unchecked(groups: Vec<Vec<AgentId>>, population: usize) -> Self {
        let mut membership = vec![HouseholdId::INVALID; population];
        for (h, group) in groups.iter().enumerate() {
            for &agent in group {
                membership[agent.index()] = HouseholdId(h as u32);
            }
        }
        Self { groups, membership }
    }

    /// Number of households.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of agents covered by the partition.
    pub fn population(&self) -> usize {
        self.membership.len()
    }

    /// Members of one household.
    #[inline]
    pub fn members(&self, household: HouseholdId) -> &[AgentId] {
        &self.groups[household.index()]
    }

    /// The household an agent belongs to.
    #[inline]
    pub fn household_of(&self, agent: AgentId) -> HouseholdId {
        self.membership[agent.index()]
    }

    /// Iterator over `(HouseholdId, members)`.
    pub fn iter(&self) -> impl Iterator<Item = (HouseholdId, &[AgentId])> + '_ {
        self.groups
            .iter()
            .enumerate()
            .map(|(h, g)| (HouseholdId(h as u32), g.as_slice()))
    }
}
