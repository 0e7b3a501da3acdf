use crate::http::ApiClient;
use crate::models::{OrderList, PurchaseRequest, PurchaseResponse, TicketOrder};
use crate::utils::error::ClientError;

#[derive(Clone)]
pub struct TicketService {
    api: ApiClient,
}

impl TicketService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submits one purchase. There is no idempotency key: resubmitting after
    /// a failure is a new request.
    pub async fn purchase_ticket(
        &self,
        request: &PurchaseRequest,
    ) -> Result<PurchaseResponse, ClientError> {
        tracing::info!(event_id = %request.event_id, quantity = request.quantity, "Submitting purchase");

        let result = match self
            .api
            .post::<_, PurchaseResponse>("/tickets/purchase", request)
            .await
        {
            Ok(envelope) => envelope
                .into_required("Purchase failed")
                .map_err(ClientError::Purchase),
            Err(ClientError::Unauthorized(_)) => Err(ClientError::SessionExpired),
            Err(ClientError::Api { message, .. }) => Err(ClientError::Purchase(message)),
            Err(e) => Err(e),
        };

        result
            .inspect(|response: &PurchaseResponse| {
                tracing::info!(order_id = %response.order_id, status = %response.status, "Purchase accepted");
            })
            .inspect_err(ClientError::log)
    }

    pub async fn get_my_orders(&self) -> Result<Vec<TicketOrder>, ClientError> {
        match self.api.get::<OrderList>("/tickets/my-orders").await {
            Ok(envelope) => Ok(envelope.into_optional().map(|list| list.orders).unwrap_or_default()),
            Err(ClientError::Unauthorized(_)) => Err(ClientError::SessionExpired),
            Err(e) => {
                e.log();
                Err(e)
            }
        }
    }
}
