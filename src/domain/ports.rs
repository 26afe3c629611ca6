use crate::domain::model::BookingPayload;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// 外部預約送出服務（例如表單轉發端點）
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, payload: &BookingPayload) -> Result<()>;
}

#[async_trait]
impl<T: BookingSubmitter + ?Sized> BookingSubmitter for Box<T> {
    async fn submit(&self, payload: &BookingPayload) -> Result<()> {
        (**self).submit(payload).await
    }
}

/// 儲存 .ics 檔案的平台存檔功能
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider: Send + Sync {
    fn relay_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
}
