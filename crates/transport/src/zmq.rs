//! ZeroMQ implementations of the four socket roles.
//!
//! All roles reduce multipart messages to their last frame, which is where
//! the payload lives (a router prepends the peer identity frame).
//!
//! A ZeroMQ connect keeps retrying an unreachable peer in the background, so
//! every connect here is bounded by a timeout and reported as
//! [`TransportError::ConnectTimeout`] when it expires.

use crate::error::TransportError;
use crate::{MessageSink, MessageSource};
use async_trait::async_trait;
use bytes::Bytes;
use fanout_core::Endpoint;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};
use zeromq::{
    DealerSocket, PubSocket, RouterSocket, Socket, SocketRecv, SocketSend, SubSocket, ZmqError,
    ZmqMessage,
};

/// Subscription filter that matches every topic.
const SUBSCRIBE_ALL: &str = "";

fn last_frame(message: ZmqMessage) -> Result<Bytes, TransportError> {
    message
        .into_vecdeque()
        .pop_back()
        .ok_or(TransportError::EmptyMessage)
}

async fn connect_within<F>(
    endpoint: &str,
    limit: Duration,
    connect: F,
) -> Result<(), TransportError>
where
    F: Future<Output = Result<(), ZmqError>>,
{
    match timeout(limit, connect).await {
        Ok(result) => result.map_err(|source| TransportError::Connect {
            endpoint: endpoint.to_string(),
            source,
        }),
        Err(_) => Err(TransportError::ConnectTimeout {
            endpoint: endpoint.to_string(),
            timeout: limit,
        }),
    }
}

/// The address a socket actually bound, which differs from the requested one
/// when port 0 was asked for.
fn bound_endpoint(requested: &Endpoint, bound: zeromq::Endpoint) -> Endpoint {
    bound
        .to_string()
        .parse()
        .unwrap_or_else(|_| requested.clone())
}

/// Client side of the point-to-point submission pattern.
pub struct DealerSink {
    socket: DealerSocket,
}

impl DealerSink {
    /// Open a dealer socket connected to `endpoint`.
    ///
    /// The connection is established once and reused for the process lifetime.
    pub async fn connect(endpoint: &Endpoint, limit: Duration) -> Result<Self, TransportError> {
        let mut socket = DealerSocket::new();
        let address = endpoint.to_string();

        connect_within(&address, limit, socket.connect(&address)).await?;

        info!("Dealer connected to {}", endpoint);

        Ok(Self { socket })
    }
}

#[async_trait]
impl MessageSink for DealerSink {
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError> {
        self.socket
            .send(ZmqMessage::from(payload))
            .await
            .map_err(TransportError::Send)
    }
}

/// One subscriber socket connected to every publisher endpoint.
///
/// ZeroMQ fair-queues inbound messages across the connections, so a single
/// `recv` covers all publishers and the source of a message is not visible.
pub struct SubscriberSource {
    socket: SubSocket,
}

impl SubscriberSource {
    /// Connect to each endpoint in turn and subscribe to all topics.
    ///
    /// `limit` bounds each connection separately.
    pub async fn connect_all(
        endpoints: &[Endpoint],
        limit: Duration,
    ) -> Result<Self, TransportError> {
        let mut socket = SubSocket::new();

        for endpoint in endpoints {
            let address = endpoint.to_string();

            connect_within(&address, limit, socket.connect(&address)).await?;

            socket
                .subscribe(SUBSCRIBE_ALL)
                .await
                .map_err(|source| TransportError::Subscribe {
                    endpoint: address.clone(),
                    source,
                })?;

            debug!("Subscriber connected to {}", address);
        }

        info!(
            "Subscriber connected to {} publisher(s): {}",
            endpoints.len(),
            endpoints
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { socket })
    }
}

#[async_trait]
impl MessageSource for SubscriberSource {
    async fn recv(&mut self) -> Result<Bytes, TransportError> {
        let message = self.socket.recv().await.map_err(TransportError::Receive)?;
        last_frame(message)
    }
}

/// Server side of the point-to-point submission pattern.
pub struct RouterSource {
    socket: RouterSocket,
    endpoint: Endpoint,
}

impl RouterSource {
    pub async fn bind(endpoint: &Endpoint) -> Result<Self, TransportError> {
        let mut socket = RouterSocket::new();
        let bound = socket
            .bind(&endpoint.to_string())
            .await
            .map_err(|source| TransportError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let endpoint = bound_endpoint(endpoint, bound);
        info!("Router bound on {}", endpoint);

        Ok(Self { socket, endpoint })
    }

    /// The address the router is listening on.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSource for RouterSource {
    async fn recv(&mut self) -> Result<Bytes, TransportError> {
        let message = self.socket.recv().await.map_err(TransportError::Receive)?;
        last_frame(message)
    }
}

/// Broadcasting side of the publish/subscribe pattern.
pub struct PublisherSink {
    socket: PubSocket,
    endpoint: Endpoint,
}

impl PublisherSink {
    pub async fn bind(endpoint: &Endpoint) -> Result<Self, TransportError> {
        let mut socket = PubSocket::new();
        let bound = socket
            .bind(&endpoint.to_string())
            .await
            .map_err(|source| TransportError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let endpoint = bound_endpoint(endpoint, bound);
        info!("Publisher bound on {}", endpoint);

        Ok(Self { socket, endpoint })
    }

    /// The address the publisher is listening on.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSink for PublisherSink {
    async fn send(&mut self, payload: Bytes) -> Result<(), TransportError> {
        self.socket
            .send(ZmqMessage::from(payload))
            .await
            .map_err(TransportError::Send)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio_test::assert_ok;

    const LIMIT: Duration = Duration::from_secs(5);

    fn any_local_port() -> Endpoint {
        Endpoint::new("127.0.0.1", 0)
    }

    #[test]
    fn test_last_frame_takes_payload() {
        let mut message = ZmqMessage::from(Bytes::from_static(b"identity"));
        message.push_back(Bytes::from_static(b"payload"));

        assert_eq!(last_frame(message).unwrap(), Bytes::from_static(b"payload"));
    }

    #[tokio::test]
    async fn test_dealer_to_router_strips_identity() {
        let mut router = RouterSource::bind(&any_local_port()).await.unwrap();
        assert_ne!(router.endpoint().port(), 0);

        let mut dealer = DealerSink::connect(router.endpoint(), LIMIT).await.unwrap();
        assert_ok!(dealer.send(Bytes::from_static(b"hello")).await);

        let received = timeout(LIMIT, router.recv()).await.unwrap().unwrap();
        assert_eq!(received, Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn test_subscriber_hears_every_publisher() {
        let mut first = PublisherSink::bind(&any_local_port()).await.unwrap();
        let mut second = PublisherSink::bind(&any_local_port()).await.unwrap();

        let endpoints = vec![first.endpoint().clone(), second.endpoint().clone()];
        let mut subscriber = SubscriberSource::connect_all(&endpoints, LIMIT)
            .await
            .unwrap();

        // Publishers drop messages until the subscription has propagated,
        // so keep publishing until both have been heard.
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert_ok!(first.send(Bytes::from_static(b"a")).await);
            assert_ok!(second.send(Bytes::from_static(b"b")).await);

            while let Ok(Ok(message)) =
                timeout(Duration::from_millis(50), subscriber.recv()).await
            {
                seen.insert(message);
            }
            if seen.len() == 2 {
                break;
            }
        }

        assert!(seen.contains(&Bytes::from_static(b"a")));
        assert!(seen.contains(&Bytes::from_static(b"b")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_times_out() {
        // Reserve a port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = Endpoint::new("127.0.0.1", port);

        let result = DealerSink::connect(&endpoint, Duration::from_millis(200)).await;

        match result {
            Err(TransportError::ConnectTimeout { endpoint, timeout }) => {
                assert_eq!(endpoint, format!("tcp://127.0.0.1:{port}"));
                assert_eq!(timeout, Duration::from_millis(200));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connected to a port with no listener"),
        }
    }
}
