use serde::{Deserialize, Serialize};

/// Number of task slots in the list. The list never grows or shrinks.
pub const SLOT_COUNT: usize = 5;

/// Fixed-length sequence of task slots.
///
/// A slot is identified only by its position; reordering physically moves the
/// text between slots. Serialized as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TaskList {
    slots: [String; SLOT_COUNT],
}

impl TaskList {
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// True when the slot holds nothing but whitespace (or is out of range)
    pub fn is_blank(&self, index: usize) -> bool {
        self.get(index).is_none_or(|text| text.trim().is_empty())
    }

    /// Number of slots holding non-blank text
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|t| !t.trim().is_empty()).count()
    }

    /// Replace the text of one slot verbatim.
    pub fn set_slot(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = text.into();
        }
    }

    /// Mark the task at `index` as done by emptying its slot.
    ///
    /// Clearing does not compact the list; empty slots only float to the end
    /// on the next [`TaskList::reorder`].
    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.clear();
        }
    }

    /// Move the slot at `source` to `destination`, then compact.
    ///
    /// `None` means the drag ended outside any drop target and leaves the list
    /// untouched. Returns the index the dragged text ended up at.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> Option<usize> {
        let destination = destination?;
        if source >= SLOT_COUNT {
            return None;
        }

        let mut working = self.slots.to_vec();
        let dragged = working.remove(source);
        let destination = destination.min(working.len());
        working.insert(destination, dragged);

        let landed = if working[destination].is_empty() {
            // Empty text lands in the padding after the filled slots
            working.iter().filter(|t| !t.is_empty()).count()
        } else {
            working[..destination]
                .iter()
                .filter(|t| !t.is_empty())
                .count()
        };

        let mut filled = working.into_iter().filter(|t| !t.is_empty());
        self.slots = std::array::from_fn(|_| filled.next().unwrap_or_default());

        Some(landed)
    }
}

impl From<Vec<String>> for TaskList {
    /// Extra entries are dropped and missing ones padded with empty slots.
    fn from(values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        Self {
            slots: std::array::from_fn(|_| values.next().unwrap_or_default()),
        }
    }
}

impl From<TaskList> for Vec<String> {
    fn from(list: TaskList) -> Self {
        list.slots.into()
    }
}
