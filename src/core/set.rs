use super::credential::Credential;

/// An insertion-ordered collection of credentials without duplicates.
///
/// The set hands out ordinals: every successful insert receives the next number, starting at 1
/// for a fresh set. A rejected duplicate does not consume a number.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    entries: Vec<Credential>,
    next_ordinal: usize,
}

impl Default for CredentialSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_ordinal: 1,
        }
    }

    /// Insert unless an equal credential is already present. Returns whether it was added.
    pub fn insert(&mut self, mut credential: Credential) -> bool {
        if self.entries.contains(&credential) {
            return false;
        }
        credential.ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.entries.push(credential);
        true
    }

    pub fn contains(&self, credential: &Credential) -> bool {
        self.entries.contains(credential)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Credential> {
        self.entries.iter().find(|c| c.ordinal == ordinal)
    }

    pub fn get_mut(&mut self, ordinal: usize) -> Option<&mut Credential> {
        self.entries.iter_mut().find(|c| c.ordinal == ordinal)
    }

    /// Credentials ordered by ordinal, as they are displayed and persisted.
    pub fn sorted(&self) -> Vec<&Credential> {
        let mut out: Vec<&Credential> = self.entries.iter().collect();
        out.sort_by_key(|c| c.ordinal);
        out
    }

    pub fn remove(&mut self, ordinal: usize) -> Option<Credential> {
        let pos = self.entries.iter().position(|c| c.ordinal == ordinal)?;
        Some(self.entries.remove(pos))
    }

    /// Exchange the ordinals of two entries. Returns false, leaving the set untouched, when
    /// either ordinal is unknown.
    pub fn swap_ordinals(&mut self, a: usize, b: usize) -> bool {
        let pa = self.entries.iter().position(|c| c.ordinal == a);
        let pb = self.entries.iter().position(|c| c.ordinal == b);
        match (pa, pb) {
            (Some(pa), Some(pb)) if pa != pb => {
                self.entries[pa].ordinal = b;
                self.entries[pb].ordinal = a;
                true
            }
            _ => false,
        }
    }

    /// Copy of the set without the records created by bulk imports. Ordinals are preserved.
    pub fn without_imports(&self) -> CredentialSet {
        CredentialSet {
            entries: self
                .entries
                .iter()
                .filter(|c| !c.is_import())
                .cloned()
                .collect(),
            next_ordinal: self.next_ordinal,
        }
    }
}

impl Extend<Credential> for CredentialSet {
    fn extend<T: IntoIterator<Item = Credential>>(&mut self, iter: T) {
        for c in iter {
            self.insert(c);
        }
    }
}

impl FromIterator<Credential> for CredentialSet {
    fn from_iter<T: IntoIterator<Item = Credential>>(iter: T) -> Self {
        let mut set = CredentialSet::new();
        set.extend(iter);
        set
    }
}

/// Membership equality; ordinals and insertion order do not matter.
impl PartialEq for CredentialSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().all(|c| other.contains(c))
    }
}
