//! # End-to-End Flows
//!
//! Storage commands travel through the local bus inside command envelopes.
//! Replies come back either from a registered storage node or, when no node
//! answers, synthesized by the bus through the envelope's reply factory.

#[cfg(test)]
mod tests {
    use crate::integration::storage_node::{put, remove, request_bucket_info, StorageNode};
    use async_trait::async_trait;
    use message_bus::{BusError, ErrorCode, LocalBus, Message, MessageHandler, Reply};
    use std::sync::Arc;
    use std::time::Duration;
    use storage_api::{
        BucketId, BucketInfo, CommandHeader, CreateBucketCommand, DocumentId, MessageType,
        PutCommand, PutReply, RequestBucketInfoReply, ResultCode, StorageCommand, StorageError,
        StorageReply,
    };
    use storage_mbusprot::{
        AdapterConfig, ReplyMode, StorageCommandEnvelope, StorageReplyEnvelope,
        PLACEHOLDER_BUCKET_INFO,
    };
    use storage_telemetry::metrics::{
        encode_metrics, register_metrics, BUCKET_INFO_OVERWRITTEN, BUS_REPLIES_SYNTHESIZED,
    };

    const NODE: &str = "storage/cluster.content/0";

    fn passthrough() -> AdapterConfig {
        AdapterConfig {
            reply_mode: ReplyMode::PassThrough,
            ..AdapterConfig::default()
        }
    }

    async fn bus_with_node(
        node: StorageNode,
    ) -> (LocalBus<StorageCommandEnvelope>, Arc<StorageNode>) {
        let bus = LocalBus::new();
        let node = Arc::new(node);
        bus.register(NODE, node.clone()).await;
        (bus, node)
    }

    #[derive(Debug)]
    struct UnanswerableCommand {
        header: CommandHeader,
    }

    impl StorageCommand for UnanswerableCommand {
        fn header(&self) -> &CommandHeader {
            &self.header
        }

        fn make_reply(&self) -> Result<Box<dyn StorageReply>, StorageError> {
            Err(StorageError::Internal("reply pool exhausted".into()))
        }
    }

    struct Stalled;

    #[async_trait]
    impl MessageHandler<StorageCommandEnvelope> for Stalled {
        async fn handle(
            &self,
            _message: &mut StorageCommandEnvelope,
        ) -> Result<StorageReplyEnvelope, BusError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(BusError::new(ErrorCode::HandlerFailed, "unreachable"))
        }
    }

    // =========================================================================
    // UNROUTED: the bus answers on the node's behalf
    // =========================================================================

    #[tokio::test]
    async fn unrouted_put_gets_placeholder_bucket_info() {
        let bus = LocalBus::new();
        let command = put(7, 1);
        let msg_id = command.msg_id();

        let reply = bus
            .send(NODE, StorageCommandEnvelope::new(command))
            .await
            .unwrap();

        assert!(reply.has_errors());
        assert_eq!(reply.errors()[0].code, ErrorCode::NoAddressForService);
        assert_eq!(reply.reply_type(), MessageType::PutReply.id());
        assert_eq!(reply.reply().msg_id(), msg_id);

        let info = reply.reply().as_bucket_info_reply().unwrap();
        assert_eq!(info.bucket(), BucketId::new(7));
        assert_eq!(info.bucket_info(), PLACEHOLDER_BUCKET_INFO);
        assert_eq!(bus.replies_synthesized(), 1);
    }

    #[tokio::test]
    async fn unrouted_put_in_passthrough_keeps_factory_info() {
        let bus = LocalBus::new();
        let envelope = StorageCommandEnvelope::from_config(put(7, 1), &passthrough());

        let reply = bus.send(NODE, envelope).await.unwrap();

        let info = reply.reply().as_bucket_info_reply().unwrap();
        assert_eq!(info.bucket_info(), BucketInfo::default());
        assert!(reply.has_errors());
    }

    #[tokio::test]
    async fn unrouted_failing_factory_surfaces_as_bus_error() {
        let bus = LocalBus::new();
        let command = Box::new(UnanswerableCommand {
            header: CommandHeader::new(MessageType::Put),
        });

        let err = bus
            .send(NODE, StorageCommandEnvelope::new(command))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ReplyFactoryFailed);
        assert!(err.message.contains("reply pool exhausted"));
    }

    #[tokio::test]
    #[should_panic(expected = "not a bucket-info reply")]
    async fn unrouted_bucket_info_request_in_augment_mode_panics() {
        let bus = LocalBus::new();
        let _ = bus
            .send(NODE, StorageCommandEnvelope::new(request_bucket_info()))
            .await;
    }

    #[tokio::test]
    async fn unrouted_bucket_info_request_in_passthrough_is_answered() {
        let bus = LocalBus::new();
        let envelope = StorageCommandEnvelope::from_config(request_bucket_info(), &passthrough());

        let reply = bus.send(NODE, envelope).await.unwrap();

        assert_eq!(reply.reply_type(), MessageType::RequestBucketInfoReply.id());
        assert!(reply.reply().as_bucket_info_reply().is_none());
        assert_eq!(reply.errors()[0].code, ErrorCode::NoAddressForService);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_node_times_out_with_placeholder_reply() {
        let bus: LocalBus<StorageCommandEnvelope> = LocalBus::new();
        bus.register(NODE, Arc::new(Stalled)).await;

        let mut envelope = StorageCommandEnvelope::new(remove(3, 9));
        envelope.context_mut().time_remaining = Some(Duration::from_millis(250));

        let reply = bus.send(NODE, envelope).await.unwrap();

        assert_eq!(reply.errors()[0].code, ErrorCode::Timeout);
        assert_eq!(
            reply.reply().as_bucket_info_reply().unwrap().bucket_info(),
            PLACEHOLDER_BUCKET_INFO
        );
    }

    // =========================================================================
    // ROUTED: a storage node answers
    // =========================================================================

    #[tokio::test]
    async fn node_reply_keeps_command_identity() {
        let (bus, _node) = bus_with_node(StorageNode::new()).await;
        let command = put(11, 2);
        let msg_id = command.msg_id();
        let envelope = StorageCommandEnvelope::new(command);
        let correlation_id = envelope.context().correlation_id;

        let reply = bus.send(NODE, envelope).await.unwrap();

        assert!(!reply.has_errors());
        assert_eq!(reply.context().correlation_id, correlation_id);
        assert_eq!(reply.reply().msg_id(), msg_id);
        assert_eq!(reply.reply().result().code, ResultCode::Ok);

        let put_reply = reply.reply().as_any().downcast_ref::<PutReply>().unwrap();
        assert_eq!(put_reply.bucket, BucketId::new(11));
        assert_eq!(put_reply.timestamp, 2);
        assert_eq!(put_reply.bucket_info, PLACEHOLDER_BUCKET_INFO);
    }

    #[tokio::test]
    async fn node_real_info_wins_over_placeholder() {
        let (bus, node) = bus_with_node(StorageNode::reporting_real_info()).await;

        let first = bus
            .send(NODE, StorageCommandEnvelope::new(put(5, 1)))
            .await
            .unwrap();
        let second = bus
            .send(NODE, StorageCommandEnvelope::new(put(5, 2)))
            .await
            .unwrap();

        let stored = node.bucket_info(BucketId::new(5)).await.unwrap();
        assert_eq!(stored.doc_count, 2);

        let info = |r: &StorageReplyEnvelope| {
            r.reply().as_bucket_info_reply().unwrap().bucket_info()
        };
        assert_eq!(info(&first).doc_count, 1);
        assert_eq!(info(&second), stored);
    }

    #[tokio::test]
    async fn node_fills_bucket_info_listing_in_passthrough() {
        let (bus, _node) = bus_with_node(StorageNode::new()).await;
        let config = passthrough();

        for (bucket, n) in [(2, 1), (1, 2), (2, 3)] {
            bus.send(NODE, StorageCommandEnvelope::from_config(put(bucket, n), &config))
                .await
                .unwrap();
        }
        bus.send(NODE, StorageCommandEnvelope::from_config(remove(2, 1), &config))
            .await
            .unwrap();

        let reply = bus
            .send(
                NODE,
                StorageCommandEnvelope::from_config(request_bucket_info(), &config),
            )
            .await
            .unwrap();

        let listing = reply
            .reply()
            .as_any()
            .downcast_ref::<RequestBucketInfoReply>()
            .unwrap();
        let summary: Vec<(u64, u32)> = listing
            .entries
            .iter()
            .map(|e| (e.bucket.raw(), e.info.doc_count))
            .collect();
        assert_eq!(summary, vec![(1, 1), (2, 1)]);
    }

    #[tokio::test]
    async fn create_bucket_through_node_in_passthrough_reports_empty_bucket() {
        let (bus, node) = bus_with_node(StorageNode::reporting_real_info()).await;
        let command = Box::new(CreateBucketCommand::new(BucketId::new(42)).with_active(true));

        let reply = bus
            .send(NODE, StorageCommandEnvelope::from_config(command, &passthrough()))
            .await
            .unwrap();

        assert_eq!(reply.reply_type(), MessageType::CreateBucketReply.id());
        assert_eq!(
            reply.reply().as_bucket_info_reply().unwrap().bucket_info(),
            BucketInfo::default()
        );
        assert_eq!(node.bucket_info(BucketId::new(42)).await, Some(BucketInfo::default()));
    }

    #[tokio::test]
    async fn node_refusing_to_reply_ends_in_factory_failure() {
        let (bus, _node) = bus_with_node(StorageNode::new()).await;
        let command = Box::new(UnanswerableCommand {
            header: CommandHeader::new(MessageType::Put),
        });

        // The node's own make_reply fails, then the bus's synthesized reply
        // fails the same way.
        let err = bus
            .send(NODE, StorageCommandEnvelope::new(command))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ReplyFactoryFailed);
    }

    #[tokio::test]
    async fn reply_trace_inherits_envelope_level() {
        let (bus, _node) = bus_with_node(StorageNode::new()).await;
        let config = AdapterConfig {
            trace_level: 5,
            ..AdapterConfig::default()
        };

        let reply = bus
            .send(NODE, StorageCommandEnvelope::from_config(put(1, 1), &config))
            .await
            .unwrap();

        let trace = &reply.context().trace;
        assert_eq!(trace.level(), 5);
        assert!(trace.entries().iter().any(|e| e.contains("PutReply")));
    }

    #[tokio::test]
    async fn shutdown_bus_refuses_envelopes() {
        let (bus, _node) = bus_with_node(StorageNode::new()).await;
        bus.shutdown();

        let err = bus
            .send(NODE, StorageCommandEnvelope::new(put(1, 1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Shutdown);
    }

    #[tokio::test]
    async fn node_leaves_invalid_bucket_untouched() {
        let (bus, node) = bus_with_node(StorageNode::reporting_real_info()).await;
        let command = Box::new(PutCommand::new(
            BucketId::INVALID,
            DocumentId::new("id:test:doc::0"),
            1,
        ));

        let err = bus
            .send(NODE, StorageCommandEnvelope::new(command))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ReplyFactoryFailed);
        assert_eq!(node.bucket_count().await, 0);
        assert_eq!(node.bucket_info(BucketId::INVALID).await, None);
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    #[tokio::test]
    async fn unrouted_flow_is_counted() {
        // Counters are process-wide and other tests run concurrently
        let _ = register_metrics();
        let overwritten = BUCKET_INFO_OVERWRITTEN.get();
        let synthesized = BUS_REPLIES_SYNTHESIZED
            .with_label_values(&["no_address_for_service"])
            .get();

        let bus = LocalBus::new();
        bus.send(NODE, StorageCommandEnvelope::new(put(99, 1)))
            .await
            .unwrap();

        assert!(BUCKET_INFO_OVERWRITTEN.get() >= overwritten + 1.0);
        assert!(
            BUS_REPLIES_SYNTHESIZED
                .with_label_values(&["no_address_for_service"])
                .get()
                >= synthesized + 1.0
        );

        let text = encode_metrics().unwrap();
        assert!(text.contains("storage_bus_replies_synthesized_total"));
    }
}
