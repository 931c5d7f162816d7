//! Tests for variant progress tracking

#[cfg(test)]
mod tests {
    use terrazzo::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use terrazzo::io::progress::ProgressManager;

    // Tests the full lifecycle of a single variant
    // Verified by updating a variant before starting it
    #[test]
    fn test_single_variant_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);

        pm.start_variant(0, "pattern.png", 41);
        for drawn in 0..=41 {
            pm.update_shapes(0, drawn);
        }
        pm.complete_variant(0);
        pm.finish();
    }

    // Tests that a resize run can extend the expected total
    // Verified by clamping progress to the first total
    #[test]
    fn test_extend_variant() {
        let mut pm = ProgressManager::default();
        pm.initialize(1);

        pm.start_variant(0, "pattern.png", 30);
        pm.update_shapes(0, 30);
        pm.extend_variant(0, 25);
        pm.update_shapes(0, 55);
        pm.complete_variant(0);
        pm.finish();
    }

    // Tests batch mode with more variants than individual bars
    // Verified by creating one bar per variant regardless of count
    #[test]
    fn test_batch_mode() {
        let mut pm = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        pm.initialize(count);

        for index in 0..count {
            let name = format!("pattern_variant{}.png", index + 1);
            pm.start_variant(index, &name, 21);
            pm.update_shapes(index, 10);
            pm.complete_variant(index);
        }
        pm.finish();
    }

    // Tests that unknown indices are ignored
    // Verified by indexing variant state directly
    #[test]
    fn test_unknown_index_is_ignored() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);

        pm.update_shapes(3, 10);
        pm.extend_variant(7, 5);
        pm.complete_variant(9);
        pm.finish();
    }
}
