mod tests {
    use pixelmap_engine::{FrameState, FrameSync, SendInProgress};

    #[test]
    fn test_starts_ready() {
        let sync = FrameSync::new();
        assert_eq!(sync.state(), FrameState::Ready);
    }

    #[test]
    fn test_mark_update_is_idempotent() {
        let sync = FrameSync::new();
        sync.mark_update();
        assert_eq!(sync.state(), FrameState::Update);
        sync.mark_update();
        assert_eq!(sync.state(), FrameState::Update);
    }

    #[test]
    fn test_send_claims_from_ready_and_update() {
        let sync = FrameSync::new();
        assert_eq!(sync.begin_send(), Ok(()));
        assert_eq!(sync.state(), FrameState::Sending);
        sync.end_send();

        sync.mark_update();
        assert_eq!(sync.begin_send(), Ok(()));
        assert_eq!(sync.state(), FrameState::Sending);
    }

    #[test]
    fn test_second_send_is_rejected() {
        let sync = FrameSync::new();
        sync.begin_send().unwrap();
        assert_eq!(sync.begin_send(), Err(SendInProgress));
        assert_eq!(sync.state(), FrameState::Sending);
    }

    #[test]
    fn test_end_send_returns_to_ready() {
        let sync = FrameSync::new();
        sync.mark_update();
        sync.begin_send().unwrap();
        sync.end_send();
        assert_eq!(sync.state(), FrameState::Ready);
    }

    #[test]
    fn test_reset_forces_ready() {
        let sync = FrameSync::new();
        sync.mark_update();
        sync.reset();
        assert_eq!(sync.state(), FrameState::Ready);
    }
}
