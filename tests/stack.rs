mod tests {
    use pixelmap_engine::{
        ANIMATION_STACK_DEPTH, AnimationEntry, AnimationModifiers, AnimationStack, StackFull,
    };

    fn entry(index: u16) -> AnimationEntry {
        AnimationEntry::new(index, 0, 1, AnimationModifiers::empty())
    }

    // distinct per-depth field values, so a disturbed entry is visible
    fn varied(depth: usize) -> AnimationEntry {
        let index = u16::try_from(depth).unwrap();
        let loops = u8::try_from(depth).unwrap();
        AnimationEntry::new(index, loops, loops + 1, AnimationModifiers::empty())
    }

    #[test]
    fn test_push_beyond_capacity_fails_and_changes_nothing() {
        let mut stack = AnimationStack::new();
        for depth in 0..ANIMATION_STACK_DEPTH {
            assert_eq!(stack.push(varied(depth)), Ok(()));
        }
        assert!(stack.is_full());
        assert_eq!(stack.len(), ANIMATION_STACK_DEPTH);

        assert_eq!(stack.push(entry(99)), Err(StackFull));
        assert_eq!(stack.len(), ANIMATION_STACK_DEPTH);
        for (depth, existing) in stack.iter().enumerate() {
            assert_eq!(*existing, varied(depth));
        }
    }

    #[test]
    fn test_pop_returns_the_most_recent_entry() {
        let mut stack = AnimationStack::new();
        stack.push(entry(1)).unwrap();
        stack.push(entry(2)).unwrap();

        assert_eq!(stack.pop().map(|popped| popped.index), Some(2));
        assert_eq!(stack.pop().map(|popped| popped.index), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_clear_empties_the_stack() {
        let mut stack = AnimationStack::new();
        stack.push(entry(1)).unwrap();
        stack.push(entry(2)).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.get(0), None);
    }

    #[test]
    fn test_iteration_runs_bottom_up() {
        let mut stack = AnimationStack::new();
        stack.push(entry(5)).unwrap();
        stack.push(entry(6)).unwrap();
        stack.push(entry(7)).unwrap();

        let order: Vec<u16> = stack.iter().map(|active| active.index).collect();
        assert_eq!(order, vec![5, 6, 7]);
    }

    #[test]
    fn test_fresh_entries_start_at_frame_zero() {
        let fresh = AnimationEntry::new(3, 2, 4, AnimationModifiers::FALLTHROUGH);
        assert_eq!(fresh.pos, 0);
        assert_eq!(fresh.phase, 0);
        assert_eq!(fresh.loops, 2);
        assert_eq!(fresh.divider, 4);
        assert!(fresh.modifiers.contains(AnimationModifiers::FALLTHROUGH));
    }

    #[test]
    fn test_divider_of_zero_behaves_as_one() {
        let fresh = AnimationEntry::new(0, 0, 0, AnimationModifiers::empty());
        assert_eq!(fresh.divider, 1);
    }

    #[test]
    fn test_zero_loops_means_infinite() {
        assert!(entry(0).is_infinite());
        assert!(!AnimationEntry::new(0, 1, 1, AnimationModifiers::empty()).is_infinite());
    }
}
