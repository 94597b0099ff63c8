//! The special-ability container contract.

use courtbook_core::error::DomainError;

use super::features::SpecialAbility;

/// A value holding an ordered list of special abilities.
///
/// Only `special_abilities` is required. Containers that allow changes also
/// implement `special_abilities_mut`; the default reports `Unsupported`, and
/// every mutator goes through it.
pub trait SpecialAbilityContainer {
    /// The abilities, in insertion order.
    fn special_abilities(&self) -> &[SpecialAbility];

    /// Mutable access to the abilities.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` for read-only containers.
    fn special_abilities_mut(&mut self) -> Result<&mut Vec<SpecialAbility>, DomainError> {
        Err(DomainError::unsupported(
            "changing special abilities is not supported",
        ))
    }

    /// Would the container accept `ability`. Blank names are rejected.
    fn valid_special_ability(&self, ability: &SpecialAbility) -> bool {
        !ability.name.trim().is_empty()
    }

    /// Adds `ability` unless an equal one is already present. Returns whether
    /// it was added.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` for an invalid ability and
    /// `DomainError::Unsupported` for a read-only container.
    fn add_special_ability(&mut self, ability: SpecialAbility) -> Result<bool, DomainError> {
        if !self.valid_special_ability(&ability) {
            return Err(DomainError::invalid_argument("invalid ability"));
        }
        let abilities = self.special_abilities_mut()?;
        if abilities.contains(&ability) {
            return Ok(false);
        }
        abilities.push(ability);
        Ok(true)
    }

    /// Adds every ability in `abilities`. Nothing is added unless all are
    /// valid. Returns whether at least one was added.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` for a read-only container.
    fn add_special_abilities(
        &mut self,
        abilities: Vec<SpecialAbility>,
    ) -> Result<bool, DomainError> {
        if abilities.is_empty() || !abilities.iter().all(|a| self.valid_special_ability(a)) {
            return Ok(false);
        }
        let mut added = false;
        for ability in abilities {
            added |= self.add_special_ability(ability)?;
        }
        Ok(added)
    }

    /// Replaces all abilities.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if any ability is invalid (the
    /// container is left unchanged), `DomainError::Unsupported` for a
    /// read-only container.
    fn set_special_abilities(&mut self, abilities: Vec<SpecialAbility>) -> Result<(), DomainError> {
        if !abilities.iter().all(|a| self.valid_special_ability(a)) {
            return Err(DomainError::invalid_argument("invalid abilities"));
        }
        *self.special_abilities_mut()? = abilities;
        Ok(())
    }

    /// Removes `ability`. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` for a read-only container.
    fn remove_special_ability(&mut self, ability: &SpecialAbility) -> Result<bool, DomainError> {
        if !self.valid_special_ability(ability) {
            return Ok(false);
        }
        let abilities = self.special_abilities_mut()?;
        match abilities.iter().position(|a| a == ability) {
            Some(index) => {
                abilities.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes each of `abilities`. Returns whether any was present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` for a read-only container.
    fn remove_special_abilities(
        &mut self,
        abilities: &[SpecialAbility],
    ) -> Result<bool, DomainError> {
        let mut removed = false;
        for ability in abilities {
            removed |= self.remove_special_ability(ability)?;
        }
        Ok(removed)
    }

    /// Removes every ability. Returns whether there were any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unsupported` for a read-only container.
    fn clear_special_abilities(&mut self) -> Result<bool, DomainError> {
        let abilities = self.special_abilities_mut()?;
        let had_any = !abilities.is_empty();
        abilities.clear();
        Ok(had_any)
    }

    /// Is an ability equal to `ability` present.
    fn has_special_ability(&self, ability: &SpecialAbility) -> bool {
        self.valid_special_ability(ability) && self.special_abilities().contains(ability)
    }

    /// The first ability called `name`.
    fn special_ability(&self, name: &str) -> Option<&SpecialAbility> {
        self.special_abilities().iter().find(|a| a.name == name)
    }
}
