//! Thai province reference table
//!
//! Codes follow ISO 3166-2:TH. Provinces are bulk-inserted by the seeder and
//! referenced by forecasts as nearby areas.

use serde::Serialize;

/// Static province entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceSeed {
    pub code: &'static str,
    pub name_th: &'static str,
    pub name_en: Option<&'static str>,
}

impl ProvinceSeed {
    pub const fn new(
        code: &'static str,
        name_th: &'static str,
        name_en: Option<&'static str>,
    ) -> Self {
        Self {
            code,
            name_th,
            name_en,
        }
    }
}

/// All provinces in seeding order
pub const PROVINCES: &[ProvinceSeed] = &[
    ProvinceSeed::new("TH-10", "กรุงเทพมหานคร", Some("Bangkok")),
    ProvinceSeed::new("TH-11", "สมุทรปราการ", Some("Samut Prakan")),
    ProvinceSeed::new("TH-12", "นนทบุรี", Some("Nonthaburi")),
    ProvinceSeed::new("TH-13", "ปทุมธานี", Some("Pathum Thani")),
    ProvinceSeed::new("TH-14", "พระนครศรีอยุธยา", Some("Phra Nakhon Si Ayutthaya")),
    ProvinceSeed::new("TH-15", "อ่างทอง", Some("Ang Thong")),
    ProvinceSeed::new("TH-16", "ลพบุรี", Some("Lopburi")),
    ProvinceSeed::new("TH-17", "สิงห์บุรี", Some("Sing Buri")),
    ProvinceSeed::new("TH-18", "ชัยนาท", Some("Chai Nat")),
    ProvinceSeed::new("TH-19", "สระบุรี", Some("Saraburi")),
    ProvinceSeed::new("TH-20", "ชลบุรี", Some("Chon Buri")),
    ProvinceSeed::new("TH-21", "ระยอง", Some("Rayong")),
    ProvinceSeed::new("TH-22", "จันทบุรี", Some("Chanthaburi")),
    ProvinceSeed::new("TH-23", "ตราด", Some("Trat")),
    ProvinceSeed::new("TH-24", "ฉะเชิงเทรา", Some("Chachoengsao")),
    ProvinceSeed::new("TH-25", "ปราจีนบุรี", Some("Prachin Buri")),
    ProvinceSeed::new("TH-26", "นครนายก", Some("Nakhon Nayok")),
    ProvinceSeed::new("TH-27", "สระแก้ว", Some("Sa Kaeo")),
    ProvinceSeed::new("TH-30", "นครราชสีมา", Some("Nakhon Ratchasima")),
    ProvinceSeed::new("TH-31", "บุรีรัมย์", Some("Buri Ram")),
    ProvinceSeed::new("TH-32", "สุรินทร์", Some("Surin")),
    ProvinceSeed::new("TH-33", "ศรีสะเกษ", Some("Si Sa Ket")),
    ProvinceSeed::new("TH-34", "อุบลราชธานี", Some("Ubon Ratchathani")),
    ProvinceSeed::new("TH-35", "ยโสธร", Some("Yasothon")),
    ProvinceSeed::new("TH-36", "ชัยภูมิ", Some("Chaiyaphum")),
    ProvinceSeed::new("TH-37", "อำนาจเจริญ", Some("Amnat Charoen")),
    ProvinceSeed::new("TH-38", "บึงกาฬ", Some("Bueng Kan")),
    ProvinceSeed::new("TH-39", "หนองบัวลำภู", Some("Nong Bua Lam Phu")),
    ProvinceSeed::new("TH-40", "ขอนแก่น", Some("Khon Kaen")),
    ProvinceSeed::new("TH-41", "อุดรธานี", Some("Udon Thani")),
    ProvinceSeed::new("TH-42", "เลย", Some("Loei")),
    ProvinceSeed::new("TH-43", "หนองคาย", Some("Nong Khai")),
    ProvinceSeed::new("TH-44", "มหาสารคาม", Some("Maha Sarakham")),
    ProvinceSeed::new("TH-45", "ร้อยเอ็ด", Some("Roi Et")),
    ProvinceSeed::new("TH-46", "กาฬสินธุ์", Some("Kalasin")),
    ProvinceSeed::new("TH-47", "สกลนคร", Some("Sakon Nakhon")),
    ProvinceSeed::new("TH-48", "นครพนม", Some("Nakhon Phanom")),
    ProvinceSeed::new("TH-49", "มุกดาหาร", Some("Mukdahan")),
    ProvinceSeed::new("TH-50", "เชียงใหม่", Some("Chiang Mai")),
    ProvinceSeed::new("TH-51", "ลำพูน", Some("Lamphun")),
    ProvinceSeed::new("TH-52", "ลำปาง", Some("Lampang")),
    ProvinceSeed::new("TH-53", "อุตรดิตถ์", Some("Uttaradit")),
    ProvinceSeed::new("TH-54", "แพร่", Some("Phrae")),
    ProvinceSeed::new("TH-55", "น่าน", Some("Nan")),
    ProvinceSeed::new("TH-56", "พะเยา", Some("Phayao")),
    ProvinceSeed::new("TH-57", "เชียงราย", Some("Chiang Rai")),
    ProvinceSeed::new("TH-58", "แม่ฮ่องสอน", Some("Mae Hong Son")),
    ProvinceSeed::new("TH-60", "นครสวรรค์", Some("Nakhon Sawan")),
    ProvinceSeed::new("TH-61", "อุทัยธานี", Some("Uthai Thani")),
    ProvinceSeed::new("TH-62", "กำแพงเพชร", Some("Kamphaeng Phet")),
    ProvinceSeed::new("TH-63", "ตาก", Some("Tak")),
    ProvinceSeed::new("TH-64", "สุโขทัย", Some("Sukhothai")),
    ProvinceSeed::new("TH-65", "พิษณุโลก", Some("Phitsanulok")),
    ProvinceSeed::new("TH-66", "พิจิตร", Some("Phichit")),
    ProvinceSeed::new("TH-67", "เพชรบูรณ์", Some("Phetchabun")),
    ProvinceSeed::new("TH-70", "ราชบุรี", Some("Ratchaburi")),
    ProvinceSeed::new("TH-71", "กาญจนบุรี", Some("Kanchanaburi")),
    ProvinceSeed::new("TH-72", "สุพรรณบุรี", Some("Suphan Buri")),
    ProvinceSeed::new("TH-73", "นครปฐม", Some("Nakhon Pathom")),
    ProvinceSeed::new("TH-74", "สมุทรสาคร", Some("Samut Sakhon")),
    ProvinceSeed::new("TH-75", "สมุทรสงคราม", Some("Samut Songkhram")),
    ProvinceSeed::new("TH-76", "เพชรบุรี", Some("Phetchaburi")),
    ProvinceSeed::new("TH-77", "ประจวบคีรีขันธ์", Some("Prachuap Khiri Khan")),
    ProvinceSeed::new("TH-80", "นครศรีธรรมราช", Some("Nakhon Si Thammarat")),
    ProvinceSeed::new("TH-81", "กระบี่", Some("Krabi")),
    ProvinceSeed::new("TH-82", "พังงา", Some("Phang Nga")),
    ProvinceSeed::new("TH-83", "ภูเก็ต", Some("Phuket")),
    ProvinceSeed::new("TH-84", "สุราษฎร์ธานี", Some("Surat Thani")),
    ProvinceSeed::new("TH-85", "ระนอง", Some("Ranong")),
    ProvinceSeed::new("TH-86", "ชุมพร", Some("Chumphon")),
    ProvinceSeed::new("TH-90", "สงขลา", Some("Songkhla")),
    ProvinceSeed::new("TH-91", "สตูล", Some("Satun")),
    ProvinceSeed::new("TH-92", "ตรัง", Some("Trang")),
    ProvinceSeed::new("TH-93", "พัทลุง", Some("Phatthalung")),
    ProvinceSeed::new("TH-94", "ปัตตานี", Some("Pattani")),
    ProvinceSeed::new("TH-95", "ยะลา", Some("Yala")),
    ProvinceSeed::new("TH-96", "นราธิวาส", Some("Narathiwat")),
];

/// Look up a province by its code
pub fn province_by_code(code: &str) -> Option<&'static ProvinceSeed> {
    PROVINCES.iter().find(|p| p.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_province_count() {
        assert_eq!(PROVINCES.len(), 77);
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<_> = PROVINCES.iter().map(|p| p.code).collect();
        assert_eq!(codes.len(), PROVINCES.len());
    }

    #[test]
    fn test_lookup() {
        let bkk = province_by_code("TH-10").unwrap();
        assert_eq!(bkk.name_th, "กรุงเทพมหานคร");
        assert_eq!(bkk.name_en, Some("Bangkok"));
        assert!(province_by_code("TH-99").is_none());
    }
}
