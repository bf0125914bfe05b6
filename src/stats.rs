//! Per-generation history for the score graph.

/// Fixed-capacity buffer keeping the most recent samples.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn push(&mut self, value: f32) {
        let capacity = self.capacity();
        self.data[self.head] = value;
        self.head = (self.head + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let capacity = self.capacity();
        let start = if self.len < capacity { 0 } else { self.head };
        (0..self.len).map(move |i| self.data[(start + i) % capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<f32> {
        (self.len > 0).then(|| self.data[(self.head + self.capacity() - 1) % self.capacity()])
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

pub struct GenerationHistory {
    /// Score reached when the generation ended.
    pub final_scores: RingBuffer,
    /// Highest fitness reported by any agent of the generation.
    pub best_fitness: RingBuffer,
    pub deaths_this_generation: u32,
    best_this_generation: u32,
}

impl GenerationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            final_scores: RingBuffer::new(capacity),
            best_fitness: RingBuffer::new(capacity),
            deaths_this_generation: 0,
            best_this_generation: 0,
        }
    }

    pub fn record_death(&mut self, fitness: u32) {
        self.deaths_this_generation += 1;
        self.best_this_generation = self.best_this_generation.max(fitness);
    }

    pub fn finish_generation(&mut self, final_score: u32) {
        self.final_scores.push(final_score as f32);
        self.best_fitness.push(self.best_this_generation as f32);
        self.deaths_this_generation = 0;
        self.best_this_generation = 0;
    }

    pub fn clear(&mut self) {
        self.final_scores.clear();
        self.best_fitness.clear();
        self.deaths_this_generation = 0;
        self.best_this_generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_iterates_in_insertion_order_after_wrap() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        let values: Vec<f32> = buf.iter().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.last(), Some(4.0));
    }

    #[test]
    fn finishing_a_generation_snapshots_and_resets_tallies() {
        let mut history = GenerationHistory::new(8);
        history.record_death(12);
        history.record_death(40);
        history.record_death(25);
        assert_eq!(history.deaths_this_generation, 3);

        history.finish_generation(41);
        assert_eq!(history.final_scores.last(), Some(41.0));
        assert_eq!(history.best_fitness.last(), Some(40.0));
        assert_eq!(history.deaths_this_generation, 0);

        history.finish_generation(3);
        assert_eq!(history.best_fitness.last(), Some(0.0));
        assert_eq!(history.final_scores.len(), 2);

        history.clear();
        assert_eq!(history.final_scores.len(), 0);
        assert_eq!(history.final_scores.last(), None);
    }
}
